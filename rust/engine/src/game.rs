//! Round phases and the transition table between them.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Signals produced by running a phase's action, consumed by [`Phase::next`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Input(u8);

impl Input {
    pub const NONE: Input = Input(0);
    /// All but one player folded.
    pub const ONE_LEFT: Input = Input(1);
    /// The acting player did not raise the open bet.
    pub const CHECK: Input = Input(1 << 1);
    /// The acting player raised the open bet.
    pub const BET: Input = Input(1 << 2);
    /// Rotation completed a lap back to the round's first actor.
    pub const PLAYER_FIRST: Input = Input(1 << 3);
    /// Nobody owes chips under the open bet.
    pub const PLAYER_NULL: Input = Input(1 << 4);
    /// Discard rounds remain.
    pub const MORE_ROUNDS: Input = Input(1 << 5);
    /// The acting controller produced a decision this step.
    pub const CONTROL_READY: Input = Input(1 << 6);

    pub fn contains(self, other: Input) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Input {
    type Output = Input;

    fn bitor(self, rhs: Input) -> Input {
        Input(self.0 | rhs.0)
    }
}

impl BitOrAssign for Input {
    fn bitor_assign(&mut self, rhs: Input) {
        self.0 |= rhs.0;
    }
}

/// State tag of the round state machine.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Deal,
    PlayerResetInit,
    PlayerResetDisc,
    PlayerResetShow,
    BetCheck,
    BetOpen,
    AdvCheck,
    AdvOpen,
    RoundCheck,
    Discard,
    DiscardAdv,
    Show,
    ShowAdv,
    End,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Deal => "DEAL",
            Phase::PlayerResetInit => "PLAYER_RESET_INIT",
            Phase::PlayerResetDisc => "PLAYER_RESET_DISC",
            Phase::PlayerResetShow => "PLAYER_RESET_SHOW",
            Phase::BetCheck => "BET_CHECK",
            Phase::BetOpen => "BET_OPEN",
            Phase::AdvCheck => "ADV_CHECK",
            Phase::AdvOpen => "ADV_OPEN",
            Phase::RoundCheck => "ROUND_CHECK",
            Phase::Discard => "DISCARD",
            Phase::DiscardAdv => "DISCARD_ADV",
            Phase::Show => "SHOW",
            Phase::ShowAdv => "SHOW_ADV",
            Phase::End => "END",
        }
    }

    /// Phases that ask a controller for a decision and hold until it is ready.
    pub fn awaits_controller(self) -> bool {
        matches!(
            self,
            Phase::BetCheck | Phase::BetOpen | Phase::Discard | Phase::Show
        )
    }

    /// The phase that follows `self` given the signals its action produced.
    ///
    /// Controller phases ignore every other signal until
    /// [`Input::CONTROL_READY`] is present.
    ///
    /// ```
    /// use drawpoker_engine::game::{Input, Phase};
    ///
    /// assert_eq!(Phase::BetCheck.next(Input::BET), Phase::BetCheck);
    /// assert_eq!(Phase::BetCheck.next(Input::BET | Input::CONTROL_READY), Phase::AdvOpen);
    /// assert_eq!(Phase::AdvOpen.next(Input::PLAYER_NULL), Phase::RoundCheck);
    /// ```
    pub fn next(self, input: Input) -> Phase {
        if self.awaits_controller() && !input.contains(Input::CONTROL_READY) {
            return self;
        }
        let has = |flag: Input| input.contains(flag);
        match self {
            Phase::Deal => Phase::PlayerResetInit,
            Phase::PlayerResetInit => Phase::BetCheck,
            Phase::BetCheck if has(Input::BET) => Phase::AdvOpen,
            Phase::BetCheck => Phase::AdvCheck,
            Phase::AdvCheck if has(Input::PLAYER_FIRST) => Phase::RoundCheck,
            Phase::AdvCheck => Phase::BetCheck,
            Phase::BetOpen if has(Input::ONE_LEFT) => Phase::End,
            Phase::BetOpen => Phase::AdvOpen,
            Phase::AdvOpen if has(Input::PLAYER_NULL) => Phase::RoundCheck,
            Phase::AdvOpen => Phase::BetOpen,
            Phase::RoundCheck if has(Input::MORE_ROUNDS) => Phase::PlayerResetDisc,
            Phase::RoundCheck => Phase::PlayerResetShow,
            Phase::PlayerResetDisc => Phase::Discard,
            Phase::Discard => Phase::DiscardAdv,
            Phase::DiscardAdv if has(Input::PLAYER_FIRST) => Phase::BetCheck,
            Phase::DiscardAdv => Phase::Discard,
            Phase::PlayerResetShow => Phase::Show,
            Phase::Show => Phase::ShowAdv,
            Phase::ShowAdv if has(Input::PLAYER_FIRST) => Phase::End,
            Phase::ShowAdv => Phase::Show,
            Phase::End => Phase::End,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

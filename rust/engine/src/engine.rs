use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::controller::{Controller, Decision};
use crate::deck::{Deck, DEFAULT_SHUFFLE_PASSES};
use crate::errors::GameError;
use crate::game::{Input, Phase};
use crate::hand::{classify, evaluate_hand, HandStrength};
use crate::ledger::PlayerLedger;
use crate::logger::{ActionRecord, HandLog, LoggedAction};
use crate::player::{Chips, Player, STARTING_STACK};
use crate::present::{Outcome, PresentationSink, SeatSummary, Snapshot};
use crate::rules::{validate_action, BetContext, ValidatedAction};

/// Cards dealt to every seat.
pub const HAND_SIZE: usize = 5;

/// Table setup for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub starting_stack: Chips,
    /// Discard-and-bet cycles played after the opening betting round.
    pub discard_rounds: u32,
    /// Remove-and-append passes per shuffle; zero selects an exact uniform shuffle.
    pub shuffle_passes: u32,
    pub hand_size: usize,
    /// Fixed RNG seed. A random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            discard_rounds: 1,
            shuffle_passes: DEFAULT_SHUFFLE_PASSES,
            hand_size: HAND_SIZE,
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Checks the settings against a table of `seats` players.
    pub fn validate(&self, seats: usize) -> Result<(), GameError> {
        if seats < 2 {
            return Err(GameError::NotEnoughPlayers { count: seats });
        }
        if self.starting_stack == 0 {
            return Err(GameError::InvalidSettings {
                reason: "starting stack must be positive".into(),
            });
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidSettings {
                reason: "hand size must be positive".into(),
            });
        }
        if Chips::try_from(seats)
            .ok()
            .and_then(|n| n.checked_mul(self.starting_stack))
            .is_none()
        {
            return Err(GameError::InvalidSettings {
                reason: format!(
                    "{seats} stacks of {} chips overflow the chip count",
                    self.starting_stack
                ),
            });
        }
        if seats.checked_mul(self.hand_size).is_none_or(|cards| cards > 52) {
            return Err(GameError::InvalidSettings {
                reason: format!(
                    "{seats} hands of {} cards do not fit in one deck",
                    self.hand_size
                ),
            });
        }
        Ok(())
    }
}

/// Result of one [`Engine::step`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    /// The acting controller was busy; nothing changed.
    WaitingOnPlayer,
    Complete,
}

/// The round state machine.
///
/// Owns the community deck, the ledger, one controller per seat and the RNG
/// every shuffle draws from. Each [`Engine::step`] runs the current phase's
/// action once and moves to the next phase.
///
/// # Examples
///
/// ```
/// use drawpoker_engine::controller::{Controller, Scripted};
/// use drawpoker_engine::engine::{Engine, GameSettings};
/// use drawpoker_engine::player::PlayerAction;
/// use drawpoker_engine::present::Outcome;
///
/// let seats: Vec<Box<dyn Controller>> = (0..3)
///     .map(|_| Box::new(Scripted::always(PlayerAction::Check)) as Box<dyn Controller>)
///     .collect();
/// let mut engine = Engine::new(GameSettings::with_seed(7), seats).unwrap();
/// let outcome = engine.run().unwrap();
/// assert!(matches!(outcome, Outcome::Showdown { payout: 0, .. }));
/// ```
pub struct Engine {
    settings: GameSettings,
    seed: u64,
    rng: ChaCha20Rng,
    deck: Deck,
    discards: Deck,
    ledger: PlayerLedger,
    controllers: Vec<Box<dyn Controller>>,
    phase: Phase,
    pot: Chips,
    open_bet: Chips,
    rounds_left: u32,
    hand_number: u32,
    outcome: Option<Outcome>,
    log: HandLog,
}

impl Engine {
    /// Seats one player per controller and shuffles the first deck.
    pub fn new(
        settings: GameSettings,
        controllers: Vec<Box<dyn Controller>>,
    ) -> Result<Self, GameError> {
        settings.validate(controllers.len())?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let deck = Deck::new_shuffled(settings.shuffle_passes, &mut rng);
        let ledger = PlayerLedger::new(controllers.len(), settings.starting_stack);
        Ok(Self {
            rounds_left: settings.discard_rounds,
            settings,
            seed,
            rng,
            deck,
            discards: Deck::new_empty(),
            ledger,
            controllers,
            phase: Phase::Deal,
            pot: 0,
            open_bet: 0,
            hand_number: 1,
            outcome: None,
            log: HandLog::default(),
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn open_bet(&self) -> Chips {
        self.open_bet
    }
    pub fn rounds_left(&self) -> u32 {
        self.rounds_left
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    /// Cards exchanged away this hand.
    pub fn discards(&self) -> &Deck {
        &self.discards
    }
    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }
    pub fn players(&self) -> &[Player] {
        self.ledger.players()
    }
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
    pub fn history(&self) -> &HandLog {
        &self.log
    }
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        let turn = self.ledger.turn();
        Snapshot {
            hand_number: self.hand_number,
            phase: self.phase,
            pot: self.pot,
            open_bet: self.open_bet,
            turn,
            first: self.ledger.first(),
            rounds_left: self.rounds_left,
            deck_remaining: self.deck.len(),
            seats: self
                .ledger
                .players()
                .iter()
                .zip(&self.controllers)
                .map(|(p, c)| SeatSummary {
                    seat: p.index(),
                    name: c.name().to_string(),
                    stack: p.stack(),
                    bet: p.bet(),
                    active: p.is_active(),
                    cards: p.hand.len(),
                })
                .collect(),
            current_hand: self
                .ledger
                .players()
                .get(turn)
                .map(|p| p.hand.clone())
                .unwrap_or_default(),
            outcome: self.outcome.clone(),
        }
    }

    /// Runs the current phase's action once and transitions.
    ///
    /// A busy controller leaves every part of the state untouched and yields
    /// [`Status::WaitingOnPlayer`]. Contract violations are returned as
    /// errors, also without touching state.
    pub fn step(&mut self) -> Result<Status, GameError> {
        if self.outcome.is_some() {
            return Ok(Status::Complete);
        }
        let from = self.phase;
        let input = match from {
            Phase::Deal => self.deal()?,
            Phase::PlayerResetInit | Phase::PlayerResetDisc | Phase::PlayerResetShow => {
                self.ledger.reset();
                Input::NONE
            }
            Phase::BetCheck | Phase::BetOpen => self.betting()?,
            Phase::AdvCheck | Phase::DiscardAdv | Phase::ShowAdv => {
                if self.ledger.next().lapped {
                    Input::PLAYER_FIRST
                } else {
                    Input::NONE
                }
            }
            Phase::AdvOpen => match self.ledger.next_under(self.open_bet) {
                Some(_) => Input::NONE,
                None => Input::PLAYER_NULL,
            },
            Phase::RoundCheck => self.round_check(),
            Phase::Discard => self.discard()?,
            Phase::Show => self.show()?,
            Phase::End => self.end()?,
        };
        if from.awaits_controller() && !input.contains(Input::CONTROL_READY) {
            return Ok(Status::WaitingOnPlayer);
        }
        self.phase = if self.outcome.is_some() {
            Phase::End
        } else {
            from.next(input)
        };
        debug!(
            hand = self.hand_number,
            from = %from,
            to = %self.phase,
            input = input.bits(),
            turn = self.ledger.turn(),
            "transition"
        );
        Ok(if self.outcome.is_some() {
            Status::Complete
        } else {
            Status::InProgress
        })
    }

    /// Steps until a controller is busy or the hand is over.
    pub fn step_until_waiting(&mut self) -> Result<Status, GameError> {
        loop {
            match self.step()? {
                Status::InProgress => continue,
                other => return Ok(other),
            }
        }
    }

    /// Steps until the hand is over.
    ///
    /// Busy controllers are retried immediately, so this suits controllers
    /// that always answer. Event-driven drivers should call [`Engine::step`].
    pub fn run(&mut self) -> Result<Outcome, GameError> {
        loop {
            if self.step()? == Status::Complete {
                return self.outcome.clone().ok_or(GameError::HandInProgress);
            }
        }
    }

    /// Like [`Engine::run`], rendering every transition to `sink`.
    pub fn run_observed(&mut self, sink: &mut dyn PresentationSink) -> Result<Outcome, GameError> {
        sink.render(&self.snapshot());
        loop {
            let status = self.step()?;
            if status == Status::WaitingOnPlayer {
                continue;
            }
            let table = self.snapshot();
            match (&self.outcome, status) {
                (Some(outcome), Status::Complete) => {
                    sink.finished(&table, outcome);
                    return Ok(outcome.clone());
                }
                _ => sink.render(&table),
            }
        }
    }

    /// Starts the next hand of the match once the current one is over.
    ///
    /// Busted seats sit out, the first-actor seat moves on to the next seat
    /// with chips and a fresh deck is shuffled from the match RNG.
    pub fn next_hand(&mut self) -> Result<(), GameError> {
        if self.outcome.is_none() {
            return Err(GameError::HandInProgress);
        }
        let funded = self.ledger.players().iter().filter(|p| p.stack() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers { count: funded });
        }
        self.ledger.bring_all_in();
        self.ledger.rotate_first();
        self.deck = Deck::new_shuffled(self.settings.shuffle_passes, &mut self.rng);
        self.discards = Deck::new_empty();
        self.pot = 0;
        self.open_bet = 0;
        self.rounds_left = self.settings.discard_rounds;
        self.phase = Phase::Deal;
        self.outcome = None;
        self.log.clear();
        self.hand_number += 1;
        debug!(hand = self.hand_number, first = self.ledger.first(), "new hand");
        Ok(())
    }

    /// The seat holding every chip, once a hand has finished with only one funded seat.
    pub fn match_winner(&self) -> Option<usize> {
        self.outcome.as_ref()?;
        let mut funded = self.ledger.players().iter().filter(|p| p.stack() > 0);
        match (funded.next(), funded.next()) {
            (Some(p), None) => Some(p.index()),
            _ => None,
        }
    }

    fn record(&mut self, seat: usize, action: LoggedAction) {
        self.log.push(ActionRecord {
            hand: self.hand_number,
            seat,
            phase: self.phase,
            action,
        });
    }

    fn deal(&mut self) -> Result<Input, GameError> {
        if self.deck.len() != 52 {
            return Err(GameError::DeckNotFull {
                found: self.deck.len(),
            });
        }
        if let Some(p) = self.ledger.players().iter().find(|p| !p.hand.is_empty()) {
            return Err(GameError::HandNotEmpty { seat: p.index() });
        }
        let size = self.settings.hand_size;
        for p in self.ledger.players_mut().iter_mut().filter(|p| p.is_active()) {
            p.hand = self.deck.deal(size);
        }
        Ok(Input::NONE)
    }

    fn betting(&mut self) -> Result<Input, GameError> {
        let seat = self.ledger.turn();
        let table = self.snapshot();
        let player = self.ledger.get(seat)?;
        if !player.is_active() {
            return Err(GameError::PlayerAlreadyFolded { seat });
        }
        let controller = self
            .controllers
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat { seat })?;
        let action = match controller.bet(&table, player) {
            Decision::Ready(a) => a,
            Decision::Busy => return Ok(Input::NONE),
        };
        let validated = validate_action(&BetContext::for_player(player, self.open_bet), action)?;

        let before = self.open_bet;
        self.apply(seat, validated)?;
        self.record(seat, LoggedAction::Bet(validated));
        debug!(seat, action = ?validated, pot = self.pot, open_bet = self.open_bet, "bet");

        let mut input = Input::CONTROL_READY;
        if self.phase == Phase::BetCheck {
            input |= if self.open_bet > before {
                Input::BET
            } else {
                Input::CHECK
            };
        } else if self.ledger.one_in().is_some() {
            input |= Input::ONE_LEFT;
        }
        Ok(input)
    }

    fn apply(&mut self, seat: usize, action: ValidatedAction) -> Result<(), GameError> {
        let player = self.ledger.get_mut(seat)?;
        let moved = match action {
            ValidatedAction::Check => 0,
            ValidatedAction::Call(chips) => player.charge(chips)?,
            ValidatedAction::Raise { to, .. } => {
                let moved = player.charge_to_bet(to)?;
                self.open_bet = to;
                moved
            }
            ValidatedAction::Fold => {
                player.fold();
                0
            }
            ValidatedAction::AllIn(_) => {
                let moved = player.charge_all();
                self.open_bet = self.open_bet.max(player.bet());
                moved
            }
        };
        self.pot += moved;
        Ok(())
    }

    fn round_check(&mut self) -> Input {
        self.ledger.end_betting_round();
        self.open_bet = 0;
        if self.rounds_left > 0 {
            self.rounds_left -= 1;
            Input::MORE_ROUNDS
        } else {
            Input::NONE
        }
    }

    fn discard(&mut self) -> Result<Input, GameError> {
        let seat = self.ledger.turn();
        let table = self.snapshot();
        let mut hand = self.ledger.get(seat)?.hand.clone();
        hand.unmark_all();
        let controller = self
            .controllers
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat { seat })?;
        if controller.discard(&table, &mut hand) == Decision::Busy {
            return Ok(Input::NONE);
        }

        let held = &self.ledger.get(seat)?.hand;
        let chosen = Deck::from_cards(
            hand.get_marked()
                .iter()
                .copied()
                .filter(|c| held.contains(*c)),
        );
        if chosen.len() > self.deck.len() {
            self.abandon(GameError::DeckExhausted {
                needed: chosen.len(),
                remaining: self.deck.len(),
            });
            return Ok(Input::CONTROL_READY);
        }

        let player = self.ledger.get_mut(seat)?;
        player.hand.difference(&chosen);
        for _ in 0..chosen.len() {
            player.hand.add(self.deck.draw()?);
        }
        self.discards.union(&chosen);
        self.record(seat, LoggedAction::Discard {
            count: chosen.len(),
        });
        debug!(seat, count = chosen.len(), remaining = self.deck.len(), "discard");
        Ok(Input::CONTROL_READY)
    }

    /// Returns every contribution and ends the hand without a winner.
    fn abandon(&mut self, reason: GameError) {
        let refunded: Chips = self
            .ledger
            .players_mut()
            .iter_mut()
            .map(|p| p.refund())
            .sum();
        self.pot = 0;
        self.open_bet = 0;
        warn!(hand = self.hand_number, %reason, refunded, "hand abandoned");
        self.outcome = Some(Outcome::Abandoned { refunded });
    }

    fn show(&mut self) -> Result<Input, GameError> {
        let seat = self.ledger.turn();
        let table = self.snapshot();
        let mut hand = self.ledger.get(seat)?.hand.clone();
        hand.unmark_all();
        let controller = self
            .controllers
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat { seat })?;
        if controller.show(&table, &mut hand) == Decision::Busy {
            return Ok(Input::NONE);
        }

        let shown = hand.get_marked();
        let player = self.ledger.get_mut(seat)?;
        player.hand.unmark_all();
        for i in 0..player.hand.len() {
            if player.hand.get(i).is_some_and(|c| shown.contains(*c)) {
                player.hand.mark(i, true);
            }
        }
        // showing nothing counts as showing everything
        if player.hand.marked_count() == 0 {
            player.hand.mark_all();
        }
        let category = classify(player.hand.get_marked().cards());
        self.record(seat, LoggedAction::Show { category });
        Ok(Input::CONTROL_READY)
    }

    fn end(&mut self) -> Result<Input, GameError> {
        let payout = self.pot;
        let outcome = match self.ledger.one_in() {
            Some(p) => Outcome::Walkover {
                winner: p.index(),
                payout,
            },
            None => {
                let mut best: Option<(usize, HandStrength, Deck)> = None;
                for p in self.ledger.players().iter().filter(|p| p.is_active()) {
                    let shown = p.hand.get_marked();
                    let strength = evaluate_hand(shown.cards());
                    // ties keep the earlier seat
                    let better = best.as_ref().is_none_or(|(_, b, _)| strength > *b);
                    if better {
                        best = Some((p.index(), strength, shown));
                    }
                }
                let (winner, strength, hand) = best.ok_or(GameError::NotEnoughPlayers {
                    count: self.ledger.num_active(),
                })?;
                Outcome::Showdown {
                    winner,
                    payout,
                    category: strength.category,
                    hand,
                }
            }
        };
        if let Some(winner) = outcome.winner() {
            self.ledger.get_mut(winner)?.award(payout);
            info!(hand = self.hand_number, winner, payout, "hand complete");
        }
        self.pot = 0;
        self.outcome = Some(outcome);
        Ok(Input::NONE)
    }
}

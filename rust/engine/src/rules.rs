use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Chips, Player, PlayerAction as A};

/// An action that passed validation, carrying the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Check,
    Call(Chips),
    Raise { to: Chips, cost: Chips },
    Fold,
    AllIn(Chips),
}

/// What a seat faces when it is asked to bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetContext {
    pub seat: usize,
    /// The table's open bet for this round.
    pub open_bet: Chips,
    /// What the seat has already committed this round.
    pub committed: Chips,
    pub stack: Chips,
}

impl BetContext {
    pub fn for_player(player: &Player, open_bet: Chips) -> Self {
        Self {
            seat: player.index(),
            open_bet,
            committed: player.bet(),
            stack: player.stack(),
        }
    }

    /// Chips needed to match the open bet.
    pub fn owed(&self) -> Chips {
        self.open_bet.saturating_sub(self.committed)
    }
}

/// Validates a player action against the open bet and the player's stack.
///
/// Nothing is ever converted: a call or raise the stack cannot cover is an
/// overcharge, and short-stacked players must go all-in explicitly.
///
/// # Errors
///
/// - [`GameError::CheckAgainstBet`] - check while chips are owed
/// - [`GameError::NothingToCall`] - call with nothing owed
/// - [`GameError::RaiseTooSmall`] - raise not above the open bet
/// - [`GameError::FoldWhenCheckAvailable`] - fold with nothing owed
/// - [`GameError::Overcharge`] - call or raise costing more than the stack
///
/// # Examples
///
/// ```
/// use drawpoker_engine::rules::{validate_action, BetContext, ValidatedAction};
/// use drawpoker_engine::player::PlayerAction;
///
/// let ctx = BetContext { seat: 0, open_bet: 20, committed: 5, stack: 100 };
/// assert_eq!(validate_action(&ctx, PlayerAction::Call), Ok(ValidatedAction::Call(15)));
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Raise(40)),
///     Ok(ValidatedAction::Raise { to: 40, cost: 35 })
/// );
/// assert!(validate_action(&ctx, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(ctx: &BetContext, action: A) -> Result<ValidatedAction, GameError> {
    let owed = ctx.owed();
    let overcharge = |amount: Chips| GameError::Overcharge {
        seat: ctx.seat,
        amount,
        stack: ctx.stack,
    };
    match action {
        A::Check => {
            if owed == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CheckAgainstBet {
                    seat: ctx.seat,
                    owed,
                })
            }
        }
        A::Call => {
            if owed == 0 {
                Err(GameError::NothingToCall { seat: ctx.seat })
            } else if owed > ctx.stack {
                Err(overcharge(owed))
            } else {
                Ok(ValidatedAction::Call(owed))
            }
        }
        A::Raise(to) => {
            if to <= ctx.open_bet {
                return Err(GameError::RaiseTooSmall {
                    amount: to,
                    current: ctx.open_bet,
                });
            }
            let cost = to - ctx.committed;
            if cost > ctx.stack {
                Err(overcharge(cost))
            } else {
                Ok(ValidatedAction::Raise { to, cost })
            }
        }
        A::Fold => {
            if owed == 0 {
                Err(GameError::FoldWhenCheckAvailable { seat: ctx.seat })
            } else {
                Ok(ValidatedAction::Fold)
            }
        }
        A::AllIn => Ok(ValidatedAction::AllIn(ctx.stack)),
    }
}

/// Every action the seat may legally take, cheapest first. Raises are
/// represented by the minimum legal raise.
pub fn legal_actions(ctx: &BetContext) -> Vec<A> {
    let owed = ctx.owed();
    let mut out = Vec::with_capacity(4);
    if owed == 0 {
        out.push(A::Check);
    } else {
        if owed <= ctx.stack {
            out.push(A::Call);
        }
        out.push(A::Fold);
    }
    if let Some(min_raise) = ctx.open_bet.checked_add(1) {
        if min_raise.saturating_sub(ctx.committed) <= ctx.stack {
            out.push(A::Raise(min_raise));
        }
    }
    if ctx.stack > 0 {
        out.push(A::AllIn);
    }
    out
}

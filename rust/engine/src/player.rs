use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::errors::GameError;

/// Money unit. Stacks, bets and the pot are whole chips.
pub type Chips = u32;

/// Default starting stack size for each player in chips
pub const STARTING_STACK: Chips = 100;

/// A one-shot betting decision produced by a controller and consumed once by the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Stay in without adding chips (only valid when nothing is owed)
    Check,
    /// Match the open bet
    Call,
    /// Raise the open bet to the given total for this round
    Raise(Chips),
    /// Fold and forfeit the hand
    Fold,
    /// Commit the entire remaining stack
    AllIn,
}

/// One seat at the table: its hand, its money and whether it is still in the hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    index: usize,
    stack: Chips,
    bet: Chips,
    /// Chips committed across every betting round of the current hand.
    contributed: Chips,
    pub hand: Deck,
    active: bool,
}

impl Player {
    pub fn new(index: usize, stack: Chips) -> Self {
        Self {
            index,
            stack,
            bet: 0,
            contributed: 0,
            hand: Deck::new_empty(),
            active: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn bet(&self) -> Chips {
        self.bet
    }
    pub fn contributed(&self) -> Chips {
        self.contributed
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn is_all_in(&self) -> bool {
        self.active && self.stack == 0
    }

    /// Debits `amount` from the stack and commits it to the current bet.
    pub fn charge(&mut self, amount: Chips) -> Result<Chips, GameError> {
        if amount > self.stack {
            return Err(GameError::Overcharge {
                seat: self.index,
                amount,
                stack: self.stack,
            });
        }
        self.stack -= amount;
        self.bet += amount;
        self.contributed += amount;
        Ok(amount)
    }

    /// Charges whatever brings this round's bet up to `target`. Returns the chips moved.
    pub fn charge_to_bet(&mut self, target: Chips) -> Result<Chips, GameError> {
        self.charge(target.saturating_sub(self.bet))
    }

    /// Moves the whole remaining stack into the bet.
    pub fn charge_all(&mut self) -> Chips {
        let cash = self.stack;
        self.stack = 0;
        self.bet += cash;
        self.contributed += cash;
        cash
    }

    pub fn fold(&mut self) {
        self.active = false;
    }

    pub fn award(&mut self, payout: Chips) {
        self.stack = self.stack.saturating_add(payout);
    }

    /// Clears the per-round bet; the hand-wide contribution is kept.
    pub fn end_betting_round(&mut self) {
        self.bet = 0;
    }

    /// Returns every chip committed this hand to the stack.
    pub fn refund(&mut self) -> Chips {
        let back = self.contributed;
        self.stack = self.stack.saturating_add(back);
        self.bet = 0;
        self.contributed = 0;
        back
    }

    /// Resets the seat for a new hand. Seats without chips sit the hand out.
    pub fn end_hand(&mut self) {
        self.bet = 0;
        self.contributed = 0;
        self.hand = Deck::new_empty();
        self.active = self.stack > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_to_bet_moves_only_the_difference() {
        let mut p = Player::new(0, 50);
        assert_eq!(p.charge_to_bet(10), Ok(10));
        assert_eq!(p.charge_to_bet(25), Ok(15));
        assert_eq!(p.bet(), 25);
        assert_eq!(p.stack(), 25);
        assert_eq!(p.contributed(), 25);
    }

    #[test]
    fn overcharge_is_rejected_without_mutation() {
        let mut p = Player::new(3, 5);
        let err = p.charge(6).unwrap_err();
        assert_eq!(
            err,
            GameError::Overcharge {
                seat: 3,
                amount: 6,
                stack: 5
            }
        );
        assert_eq!(p.stack(), 5);
        assert_eq!(p.bet(), 0);
    }

    #[test]
    fn charge_all_empties_stack() {
        let mut p = Player::new(1, 40);
        p.charge(10).unwrap();
        assert_eq!(p.charge_all(), 30);
        assert_eq!(p.bet(), 40);
        assert!(p.is_all_in());
    }

    #[test]
    fn busted_player_sits_out_next_hand() {
        let mut p = Player::new(2, 10);
        p.charge_all();
        p.end_hand();
        assert!(!p.is_active());
        p.award(5);
        p.end_hand();
        assert!(p.is_active());
    }
}

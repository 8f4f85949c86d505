//! Seat bookkeeping and turn rotation.
//!
//! The ledger owns every [`Player`] plus two cursors: the seat that acts
//! first in each betting, discard and show round, and the seat whose turn it
//! currently is. Rotation always skips folded seats.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Chips, Player};

/// Where a call to [`PlayerLedger::next`] landed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rotation {
    pub seat: usize,
    /// The walk reached or passed the first-actor seat, so a full lap is done.
    pub lapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    players: Vec<Player>,
    first: usize,
    turn: usize,
}

impl PlayerLedger {
    /// Seats `count` players with `stack` chips each; seat 0 acts first.
    pub fn new(count: usize, stack: Chips) -> Self {
        Self {
            players: (0..count).map(|i| Player::new(i, stack)).collect(),
            first: 0,
            turn: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn get(&self, seat: usize) -> Result<&Player, GameError> {
        self.players.get(seat).ok_or(GameError::UnknownSeat { seat })
    }

    pub fn get_mut(&mut self, seat: usize) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat { seat })
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn set_first(&mut self, seat: usize) -> Result<(), GameError> {
        if seat >= self.players.len() {
            return Err(GameError::UnknownSeat { seat });
        }
        self.first = seat;
        Ok(())
    }

    pub fn current(&self) -> &Player {
        &self.players[self.turn]
    }

    pub fn num_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn any_active(&self) -> bool {
        self.players.iter().any(|p| p.is_active())
    }

    /// The sole remaining active player, if exactly one is left.
    pub fn one_in(&self) -> Option<&Player> {
        let mut active = self.players.iter().filter(|p| p.is_active());
        match (active.next(), active.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }

    /// Puts the turn back on the first actor, or the next active seat after it.
    pub fn reset(&mut self) {
        self.turn = self.first;
        if !self.current().is_active() && self.any_active() {
            self.advance();
        }
    }

    /// Advances the turn circularly to the next active seat.
    ///
    /// Callers must make sure at least one seat is active; with none the
    /// cursor stops after one lap on a folded seat.
    pub fn next(&mut self) -> Rotation {
        let lapped = self.advance();
        Rotation {
            seat: self.turn,
            lapped,
        }
    }

    fn advance(&mut self) -> bool {
        let n = self.players.len();
        let mut lapped = false;
        for _ in 0..n {
            self.turn = (self.turn + 1) % n;
            if self.turn == self.first {
                lapped = true;
            }
            if self.current().is_active() {
                break;
            }
        }
        lapped
    }

    /// Rotates until it finds an active player who still owes chips under `call`.
    ///
    /// Returns `None` once it has come back to where it started without
    /// finding one, meaning the betting round is settled. All-in players
    /// cannot put in more, so they never count as owing.
    pub fn next_under(&mut self, call: Chips) -> Option<usize> {
        let start = self.turn;
        for _ in 0..self.players.len() {
            let seat = self.next().seat;
            let p = &self.players[seat];
            if p.is_active() && p.bet() < call && p.stack() > 0 {
                return Some(seat);
            }
            if seat == start {
                break;
            }
        }
        None
    }

    /// Brings every funded seat back into the hand.
    pub fn bring_all_in(&mut self) {
        for p in &mut self.players {
            p.end_hand();
        }
    }

    /// Moves the first-actor seat to the next seat that still has chips.
    pub fn rotate_first(&mut self) {
        let n = self.players.len();
        for step in 1..=n {
            let seat = (self.first + step) % n;
            if self.players[seat].stack() > 0 {
                self.first = seat;
                break;
            }
        }
        self.turn = self.first;
    }

    /// Clears every seat's per-round bet.
    pub fn end_betting_round(&mut self) {
        for p in &mut self.players {
            p.end_betting_round();
        }
    }

    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.stack()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_and_reports_lap() {
        let mut l = PlayerLedger::new(3, 10);
        assert_eq!(l.next(), Rotation { seat: 1, lapped: false });
        assert_eq!(l.next(), Rotation { seat: 2, lapped: false });
        assert_eq!(l.next(), Rotation { seat: 0, lapped: true });
    }

    #[test]
    fn next_skips_folded_and_detects_lap_past_folded_first() {
        let mut l = PlayerLedger::new(3, 10);
        l.get_mut(0).unwrap().fold();
        l.reset();
        assert_eq!(l.turn(), 1);
        assert_eq!(l.next(), Rotation { seat: 2, lapped: false });
        assert_eq!(l.next(), Rotation { seat: 1, lapped: true });
    }

    #[test]
    fn one_in_only_with_single_active() {
        let mut l = PlayerLedger::new(3, 10);
        assert!(l.one_in().is_none());
        l.get_mut(0).unwrap().fold();
        assert!(l.one_in().is_none());
        l.get_mut(2).unwrap().fold();
        assert_eq!(l.one_in().map(|p| p.index()), Some(1));
    }

    #[test]
    fn rotate_first_skips_busted_seats() {
        let mut l = PlayerLedger::new(3, 10);
        l.get_mut(1).unwrap().charge_all();
        l.rotate_first();
        assert_eq!(l.first(), 2);
        assert_eq!(l.turn(), 2);
    }
}

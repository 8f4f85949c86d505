use serde::{Deserialize, Serialize};

use crate::game::Phase;
use crate::hand::Category;
use crate::rules::ValidatedAction;

/// What a seat did on its turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggedAction {
    Bet(ValidatedAction),
    /// Cards exchanged in a discard round.
    Discard { count: usize },
    /// Category of the cards shown down.
    Show { category: Category },
}

/// Records a single player decision during a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub hand: u32,
    pub seat: usize,
    pub phase: Phase,
    pub action: LoggedAction,
}

/// In-memory action history for the current hand.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandLog {
    records: Vec<ActionRecord>,
}

impl HandLog {
    pub fn push(&mut self, record: ActionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn for_seat(&self, seat: usize) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.records.iter().filter(move |r| r.seat == seat)
    }

    /// Betting decisions only, in the order they were applied.
    pub fn bets(&self) -> impl Iterator<Item = (usize, ValidatedAction)> + '_ {
        self.records.iter().filter_map(|r| match r.action {
            LoggedAction::Bet(a) => Some((r.seat, a)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_seat_and_kind() {
        let mut log = HandLog::default();
        log.push(ActionRecord {
            hand: 1,
            seat: 0,
            phase: Phase::BetCheck,
            action: LoggedAction::Bet(ValidatedAction::Check),
        });
        log.push(ActionRecord {
            hand: 1,
            seat: 1,
            phase: Phase::Discard,
            action: LoggedAction::Discard { count: 3 },
        });
        assert_eq!(log.len(), 2);
        assert_eq!(log.for_seat(1).count(), 1);
        assert_eq!(log.bets().collect::<Vec<_>>(), vec![(0, ValidatedAction::Check)]);
        log.clear();
        assert!(log.is_empty());
    }
}

//! A calling station: never folds, never raises, never draws.

use drawpoker_engine::controller::{Controller, Decision};
use drawpoker_engine::deck::Deck;
use drawpoker_engine::player::{Player, PlayerAction};
use drawpoker_engine::present::Snapshot;
use drawpoker_engine::rules::BetContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl Controller for CallingStation {
    fn name(&self) -> &str {
        "passive"
    }

    fn bet(&mut self, table: &Snapshot, player: &Player) -> Decision<PlayerAction> {
        let owed = BetContext::for_player(player, table.open_bet).owed();
        let action = if owed == 0 {
            PlayerAction::Check
        } else if owed <= player.stack() {
            PlayerAction::Call
        } else {
            PlayerAction::AllIn
        };
        Decision::Ready(action)
    }

    fn discard(&mut self, _table: &Snapshot, _hand: &mut Deck) -> Decision<()> {
        Decision::Ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing(open_bet: u32) -> Snapshot {
        Snapshot {
            open_bet,
            ..Snapshot::default()
        }
    }

    #[test]
    fn checks_calls_or_shoves() {
        let mut ai = CallingStation;
        let p = Player::new(0, 30);
        assert_eq!(ai.bet(&facing(0), &p), Decision::Ready(PlayerAction::Check));
        assert_eq!(ai.bet(&facing(30), &p), Decision::Ready(PlayerAction::Call));
        assert_eq!(ai.bet(&facing(31), &p), Decision::Ready(PlayerAction::AllIn));
    }

    #[test]
    fn stands_pat() {
        let mut hand = Deck::new_full().deal(5);
        assert!(CallingStation.discard(&facing(0), &mut hand).is_ready());
        assert_eq!(hand.marked_count(), 0);
    }
}

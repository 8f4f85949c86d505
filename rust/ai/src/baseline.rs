//! Baseline AI implementation for draw poker.
//!
//! Provides a simple rule-based opponent that can be used for testing and
//! benchmarking. Betting is driven by the category of the current five cards
//! and pot odds; discarding keeps made combinations and draws to the rest.

use drawpoker_engine::cards::Card;
use drawpoker_engine::controller::{Controller, Decision};
use drawpoker_engine::deck::Deck;
use drawpoker_engine::hand::{classify, Category};
use drawpoker_engine::player::{Chips, Player, PlayerAction};
use drawpoker_engine::present::Snapshot;
use drawpoker_engine::rules::{legal_actions, validate_action, BetContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest amount the baseline AI ever raises by.
pub const BET_UNIT: Chips = 5;

/// Simple baseline AI implementation for testing and comparison.
///
/// # Strategy
///
/// **Betting:**
/// - Very strong hands (full house+): Raise by two thirds of the pot
/// - Strong hands (trips, straight, flush): Raise by half the pot, call any bet
/// - Medium hands (two pair, high pair): Call if pot odds are favorable
/// - Weak hands: Check when free, fold to bets
///
/// **Discarding:**
/// - Straight or better: Stand pat
/// - Pairs, trips, quads: Keep them, exchange the rest
/// - Four to a flush: Exchange the odd card
/// - Nothing: Keep the two highest cards
///
/// Decisions are deterministic unless a bluff rate is set, in which case a
/// seeded RNG occasionally turns a free check into a minimum raise.
///
/// # Example
///
/// ```rust
/// use drawpoker_ai::baseline::BaselineAI;
/// use drawpoker_engine::controller::Controller;
///
/// let ai = BaselineAI::new();
/// assert_eq!(ai.name(), "baseline");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI {
    bluff_rate: f64,
    rng: StdRng,
}

impl BaselineAI {
    pub fn new() -> Self {
        Self {
            bluff_rate: 0.0,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// A baseline AI that bluffs with probability `rate` when it could check.
    pub fn with_bluffs(rate: f64, seed: u64) -> Self {
        Self {
            bluff_rate: rate.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Rate the hand on a 0-10 scale.
    ///
    /// - 9-10: Full house and better
    /// - 7-8: Three of a kind, straight, flush
    /// - 5-6: Two pair, pair of jacks or better
    /// - 3-4: Lower pairs
    /// - 0-2: No pair, by highest card
    fn evaluate_strength(cards: &[Card]) -> u8 {
        match classify(cards) {
            Category::RoyalFlush | Category::StraightFlush | Category::FourOfAKind => 10,
            Category::FullHouse => 9,
            Category::Flush | Category::Straight => 8,
            Category::ThreeOfAKind => 7,
            Category::TwoPair => 6,
            Category::Pair => match Self::pair_rank(cards) {
                Some(r) if r >= 11 => 5,
                Some(r) if r >= 8 => 4,
                _ => 3,
            },
            Category::HighCard => match cards.iter().map(|c| c.rank as u8).max() {
                Some(14) => 2,
                Some(r) if r >= 12 => 1,
                _ => 0,
            },
        }
    }

    fn pair_rank(cards: &[Card]) -> Option<u8> {
        cards
            .iter()
            .map(|c| c.rank as u8)
            .filter(|r| cards.iter().filter(|c| c.rank as u8 == *r).count() >= 2)
            .max()
    }

    /// Pot odds as a ratio (pot / (pot + call)).
    fn calculate_pot_odds(pot_size: Chips, call_amount: Chips) -> f32 {
        if call_amount == 0 {
            return 1.0;
        }
        pot_size as f32 / (pot_size + call_amount) as f32
    }

    /// Make a decision based on table state and hand strength.
    fn decide_action(
        hand_strength: u8,
        to_call: Chips,
        open_bet: Chips,
        stack: Chips,
        pot: Chips,
    ) -> PlayerAction {
        if to_call == 0 {
            return Self::decide_no_bet_action(hand_strength, open_bet, stack, pot);
        }

        // Not enough chips to call: all-in or fold
        if to_call > stack {
            return if hand_strength >= 7 {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }

        let pot_odds = Self::calculate_pot_odds(pot, to_call);
        match hand_strength {
            9..=10 => {
                let spare = stack - to_call;
                if spare >= BET_UNIT {
                    let raise = (pot / 2).max(BET_UNIT).min(spare);
                    PlayerAction::Raise(open_bet + raise)
                } else {
                    PlayerAction::Call
                }
            }
            7..=8 => PlayerAction::Call,
            5..=6 => {
                if pot_odds >= 0.6 || to_call <= pot / 4 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            3..=4 => {
                if pot_odds >= 0.75 || to_call <= pot / 6 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            _ => PlayerAction::Fold,
        }
    }

    /// Decide action when there's nothing to call.
    fn decide_no_bet_action(
        hand_strength: u8,
        open_bet: Chips,
        stack: Chips,
        pot: Chips,
    ) -> PlayerAction {
        if stack < BET_UNIT {
            return PlayerAction::Check;
        }
        let size = match hand_strength {
            9..=10 => pot * 2 / 3,
            7..=8 => pot / 2,
            _ => return PlayerAction::Check,
        };
        PlayerAction::Raise(open_bet + size.max(BET_UNIT).min(stack))
    }

    /// Indices of the cards to exchange, weakest first.
    fn choose_discards(hand: &Deck) -> Vec<usize> {
        let cards = hand.cards();
        if classify(cards) >= Category::Straight {
            return Vec::new();
        }
        let count = |c: &Card| cards.iter().filter(|o| o.rank == c.rank).count();
        let mut out: Vec<usize> = if cards.iter().any(|c| count(c) >= 2) {
            (0..cards.len()).filter(|&i| count(&cards[i]) == 1).collect()
        } else if let Some(suit) = cards
            .iter()
            .map(|c| c.suit)
            .find(|s| cards.iter().filter(|c| c.suit == *s).count() == cards.len() - 1)
        {
            (0..cards.len()).filter(|&i| cards[i].suit != suit).collect()
        } else {
            let mut by_rank: Vec<usize> = (0..cards.len()).collect();
            by_rank.sort_by_key(|&i| std::cmp::Reverse(cards[i].rank));
            by_rank.into_iter().skip(2).collect()
        };
        out.sort_by_key(|&i| cards[i].rank);
        out
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for BaselineAI {
    fn name(&self) -> &str {
        "baseline"
    }

    /// Always answers; the chosen action is checked against the betting
    /// rules and replaced by the cheapest legal action if it would be rejected.
    fn bet(&mut self, table: &Snapshot, player: &Player) -> Decision<PlayerAction> {
        let ctx = BetContext::for_player(player, table.open_bet);
        let strength = Self::evaluate_strength(player.hand.cards());
        let mut action = Self::decide_action(
            strength,
            ctx.owed(),
            table.open_bet,
            player.stack(),
            table.pot,
        );
        if action == PlayerAction::Check
            && self.bluff_rate > 0.0
            && player.stack() >= BET_UNIT
            && self.rng.random_bool(self.bluff_rate)
        {
            action = PlayerAction::Raise(table.open_bet + BET_UNIT);
        }
        if validate_action(&ctx, action).is_err() {
            action = legal_actions(&ctx)
                .first()
                .copied()
                .unwrap_or(PlayerAction::AllIn);
        }
        Decision::Ready(action)
    }

    fn discard(&mut self, table: &Snapshot, hand: &mut Deck) -> Decision<()> {
        let picks = Self::choose_discards(hand);
        // never ask for more replacements than the deck holds
        for i in picks.into_iter().take(table.deck_remaining) {
            hand.mark(i, true);
        }
        Decision::Ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(text: &[&str]) -> Deck {
        Deck::from_cards(text.iter().map(|s| s.parse::<Card>().expect("card")))
    }

    fn table(open_bet: Chips, pot: Chips, deck_remaining: usize) -> Snapshot {
        Snapshot {
            open_bet,
            pot,
            deck_remaining,
            ..Snapshot::default()
        }
    }

    fn player_with(cards: Deck, stack: Chips) -> Player {
        let mut p = Player::new(0, stack);
        p.hand = cards;
        p
    }

    #[test]
    fn test_baseline_ai_creation() {
        let ai = BaselineAI::new();
        assert_eq!(ai.name(), "baseline");
        assert_eq!(BaselineAI::default().bluff_rate, 0.0);
    }

    #[test]
    fn test_strength_follows_category() {
        let quads = Deck::canonical(Category::FourOfAKind);
        assert_eq!(BaselineAI::evaluate_strength(quads.cards()), 10);
        let tens = Deck::canonical(Category::Pair);
        assert_eq!(BaselineAI::evaluate_strength(tens.cards()), 4);
        let nothing = hand(&["2c", "4d", "7h", "9c", "Jc"]);
        assert_eq!(BaselineAI::evaluate_strength(nothing.cards()), 0);
    }

    #[test]
    fn test_pot_odds_calculation() {
        let odds = BaselineAI::calculate_pot_odds(100, 50);
        assert!((odds - 0.667).abs() < 0.01);
        assert_eq!(BaselineAI::calculate_pot_odds(100, 0), 1.0);
    }

    #[test]
    fn test_strong_hand_bets_when_free() {
        let mut ai = BaselineAI::new();
        let p = player_with(Deck::canonical(Category::FullHouse), 100);
        let d = ai.bet(&table(0, 30, 20), &p);
        assert_eq!(d, Decision::Ready(PlayerAction::Raise(20)));
    }

    #[test]
    fn test_weak_hand_checks_or_folds() {
        let mut ai = BaselineAI::new();
        let p = player_with(hand(&["2c", "4d", "7h", "9c", "Jc"]), 100);
        assert_eq!(
            ai.bet(&table(0, 0, 20), &p),
            Decision::Ready(PlayerAction::Check)
        );
        assert_eq!(
            ai.bet(&table(40, 40, 20), &p),
            Decision::Ready(PlayerAction::Fold)
        );
    }

    #[test]
    fn test_short_stack_goes_all_in_with_strength() {
        let mut ai = BaselineAI::new();
        let p = player_with(Deck::canonical(Category::Flush), 10);
        assert_eq!(
            ai.bet(&table(50, 50, 20), &p),
            Decision::Ready(PlayerAction::AllIn)
        );
    }

    #[test]
    fn test_discard_keeps_pairs() {
        let mut ai = BaselineAI::new();
        let mut h = Deck::canonical(Category::TwoPair);
        assert!(ai.discard(&table(0, 0, 20), &mut h).is_ready());
        let marked = h.get_marked();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked.get(0).map(|c| c.to_string()), Some("10c".to_string()));
    }

    #[test]
    fn test_discard_draws_to_flush_and_stands_pat_on_straight() {
        let mut ai = BaselineAI::new();
        let mut draw = hand(&["2h", "7h", "9h", "Kh", "3s"]);
        ai.discard(&table(0, 0, 20), &mut draw);
        assert_eq!(draw.get_marked().cards(), hand(&["3s"]).cards());

        let mut straight = Deck::canonical(Category::Straight);
        ai.discard(&table(0, 0, 20), &mut straight);
        assert_eq!(straight.marked_count(), 0);
    }

    #[test]
    fn test_discard_respects_deck_remaining() {
        let mut ai = BaselineAI::new();
        let mut h = hand(&["2c", "4d", "7h", "9s", "Jc"]);
        ai.discard(&table(0, 0, 2), &mut h);
        assert_eq!(h.marked_count(), 2);
        // lowest cards go first
        assert!(h.get_marked().iter().all(|c| c.rank as u8 <= 4));
    }

    #[test]
    fn test_bluffing_is_seeded() {
        let p = player_with(hand(&["2c", "4d", "7h", "9s", "Jc"]), 100);
        let run = |seed| {
            let mut ai = BaselineAI::with_bluffs(0.5, seed);
            (0..20)
                .map(|_| ai.bet(&table(0, 0, 20), &p))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
        assert!(run(3)
            .iter()
            .any(|d| *d == Decision::Ready(PlayerAction::Raise(BET_UNIT))));
    }
}

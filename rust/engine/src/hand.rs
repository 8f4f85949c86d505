use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Poker hand categories, weakest first. The derived ordering is the ranking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct RankBucket {
    count: u8,
    suits: u8,
}

/// Classifies any card collection into its best category.
///
/// One pass builds a per-suit count and a per-rank (count, suit bitmask)
/// histogram; a second pass over the 13 ranks in ascending order runs the
/// pair/trip/quad detectors and the straight detector side by side. A run of
/// five or more ranks is a straight, upgraded to a straight flush when the
/// last five ranks of the run share a suit (royal when the run tops at Ace). Every
/// detector only ever raises the result, so the answer is the best category
/// any of them saw. Aces rank high only; `A 2 3 4 5` is not a straight.
///
/// # Examples
///
/// ```
/// use drawpoker_engine::deck::Deck;
/// use drawpoker_engine::hand::{classify, Category};
///
/// let hand = Deck::canonical(Category::FullHouse);
/// assert_eq!(classify(hand.cards()), Category::FullHouse);
/// ```
pub fn classify(cards: &[Card]) -> Category {
    let mut best = Category::HighCard;
    let mut suit_counts = [0u8; 4];
    let mut ranks = [RankBucket::default(); 13];

    for c in cards {
        let s = &mut suit_counts[c.suit.index()];
        *s += 1;
        if *s > 4 {
            best = best.max(Category::Flush);
        }
        let bucket = &mut ranks[c.rank.offset()];
        bucket.count += 1;
        bucket.suits |= c.suit.bit();
    }

    let mut pair = false;
    let mut trip = false;
    let mut multiples = 0usize;
    let mut run = 0usize;
    for (offset, bucket) in ranks.iter().enumerate() {
        match bucket.count {
            2 => {
                best = best.max(if pair {
                    Category::TwoPair
                } else {
                    Category::Pair
                });
                pair = true;
            }
            3 => {
                best = best.max(Category::ThreeOfAKind);
                trip = true;
            }
            4 => best = best.max(Category::FourOfAKind),
            _ => {}
        }
        if bucket.count >= 2 {
            multiples += 1;
        }

        if bucket.count == 0 {
            run = 0;
            continue;
        }
        run += 1;
        if run > 4 {
            // only the five ranks ending here need a common suit
            let suited = ranks[offset - 4..=offset]
                .iter()
                .fold(0x0F, |m, b| m & b.suits);
            let found = if suited == 0 {
                Category::Straight
            } else if offset == Rank::Ace.offset() {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            best = best.max(found);
        }
    }

    // a second set of trips fills the pair slot of a full house
    if trip && multiples >= 2 {
        best = best.max(Category::FullHouse);
    }
    best
}

/// Showdown strength: the category, then the single highest rank as tie-break.
///
/// Kickers beyond the highest card are deliberately not compared.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub high: Option<Rank>,
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.high.cmp(&other.high))
    }
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    HandStrength {
        category: classify(cards),
        high: cards.iter().map(|c| c.rank).max(),
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn empty_collection_is_high_card() {
        assert_eq!(classify(&[]), Category::HighCard);
        assert_eq!(evaluate_hand(&[]).high, None);
    }

    #[test]
    fn straight_run_resets_on_gap() {
        let cards = [
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Hearts),
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Five, Suit::Spades),
            Card::new(Rank::Seven, Suit::Clubs),
        ];
        assert_eq!(classify(&cards), Category::HighCard);
    }

    #[test]
    fn ace_low_wheel_is_not_a_straight() {
        let cards = [
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Four, Suit::Spades),
            Card::new(Rank::Five, Suit::Clubs),
        ];
        assert_eq!(classify(&cards), Category::HighCard);
    }

    #[test]
    fn strength_orders_by_high_card_within_category() {
        let low = HandStrength {
            category: Category::Pair,
            high: Some(Rank::Nine),
        };
        let high = HandStrength {
            category: Category::Pair,
            high: Some(Rank::King),
        };
        let trips = HandStrength {
            category: Category::ThreeOfAKind,
            high: Some(Rank::Four),
        };
        assert!(compare_hands(&high, &low).is_gt());
        assert!(trips > high);
    }
}

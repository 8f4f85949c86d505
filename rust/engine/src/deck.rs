use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card, Rank, Suit};
use crate::errors::GameError;
use crate::hand::Category;

/// Passes used by [`Deck::shuffle`] when callers have no preference.
pub const DEFAULT_SHUFFLE_PASSES: u32 = 2048;

/// An ordered, duplicate-free card collection.
///
/// The same type serves as the community deck, a player's hand and a discard
/// pile. Cards only move between collections through operations that remove
/// them from the source first, so one physical card never sits in two live
/// collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit-major, ascending-rank order.
    pub fn new_full() -> Self {
        Self { cards: full_deck() }
    }

    pub fn new_empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// A full deck shuffled with `passes` remove-and-append passes, or an
    /// exact uniform permutation when `passes` is zero.
    pub fn new_shuffled<R: Rng + ?Sized>(passes: u32, rng: &mut R) -> Self {
        let mut deck = Self::new_full();
        if passes == 0 {
            deck.shuffle_uniform(rng);
        } else {
            deck.shuffle(passes, rng);
        }
        deck
    }

    /// Builds a collection from `cards`, dropping repeats of a card already present.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut deck = Self::new_empty();
        for c in cards {
            deck.add(c);
        }
        deck
    }

    /// The canonical example hand for `category`.
    #[rustfmt::skip]
    pub fn canonical(category: Category) -> Self {
        use Rank::*;
        use Suit::*;
        let layout: [(Rank, Suit); 5] = match category {
            Category::HighCard => [(Two, Clubs), (Four, Diamonds), (Seven, Hearts), (Ten, Clubs), (Queen, Clubs)],
            Category::Pair => [(Ten, Clubs), (Four, Diamonds), (Seven, Hearts), (Ten, Spades), (Queen, Clubs)],
            Category::TwoPair => [(Two, Clubs), (Two, Diamonds), (Queen, Hearts), (Ten, Clubs), (Queen, Clubs)],
            Category::ThreeOfAKind => [(Ten, Clubs), (Ten, Diamonds), (Seven, Hearts), (Ten, Spades), (Queen, Clubs)],
            Category::Straight => [(Five, Clubs), (Six, Diamonds), (Seven, Hearts), (Eight, Spades), (Nine, Clubs)],
            Category::Flush => [(Ten, Hearts), (Jack, Hearts), (Seven, Hearts), (King, Hearts), (Ace, Hearts)],
            Category::FullHouse => [(Ten, Clubs), (Ten, Diamonds), (Queen, Hearts), (Ten, Spades), (Queen, Clubs)],
            Category::FourOfAKind => [(Ten, Clubs), (Ten, Diamonds), (Ten, Hearts), (Ten, Spades), (Queen, Clubs)],
            Category::StraightFlush => [(Nine, Hearts), (Ten, Hearts), (Jack, Hearts), (Queen, Hearts), (King, Hearts)],
            Category::RoyalFlush => [(Ten, Hearts), (Jack, Hearts), (Queen, Hearts), (King, Hearts), (Ace, Hearts)],
        };
        Self::from_cards(layout.into_iter().map(|(r, s)| Card::new(r, s)))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn get(&self, i: usize) -> Option<&Card> {
        self.cards.get(i)
    }

    pub fn find(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|c| *c == card)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.find(card).is_some()
    }

    /// True when every card of `self` is also in `other`.
    pub fn is_subset(&self, other: &Deck) -> bool {
        self.cards.iter().all(|c| other.contains(*c))
    }

    /// Appends `card` unless an equal card is already present. Returns whether it was added.
    pub fn add(&mut self, card: Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Removes and returns the card at `i`, keeping the order of the rest.
    pub fn remove(&mut self, i: usize) -> Option<Card> {
        if i < self.cards.len() {
            Some(self.cards.remove(i))
        } else {
            None
        }
    }

    /// Swaps the first half with the second half element-wise.
    pub fn cut(&mut self) {
        let split = self.cards.len() / 2;
        for i in 0..split {
            self.cards.swap(i, i + split);
        }
    }

    /// `passes` rounds of removing a uniformly random card and appending it at the end.
    ///
    /// This approximates a uniform permutation for large `passes`; see
    /// [`Deck::shuffle_uniform`] for an exact one.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, passes: u32, rng: &mut R) {
        if self.cards.len() < 2 {
            return;
        }
        for _ in 0..passes {
            let idx = rng.random_range(0..self.cards.len());
            let c = self.cards.remove(idx);
            self.cards.push(c);
        }
    }

    pub fn shuffle_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top (last) card.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Removes and returns a uniformly random card.
    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        let idx = rng.random_range(0..self.cards.len());
        Ok(self.cards.remove(idx))
    }

    /// Moves up to `n` top cards, in draw order, into a new collection.
    /// Stops early when the source runs out.
    pub fn deal(&mut self, n: usize) -> Deck {
        let take = n.min(self.cards.len());
        let mut hand = Deck::new_empty();
        for _ in 0..take {
            if let Some(c) = self.cards.pop() {
                hand.cards.push(c);
            }
        }
        hand
    }

    /// Appends every card of `other` not already present.
    pub fn union(&mut self, other: &Deck) {
        for c in other.iter() {
            self.add(*c);
        }
    }

    /// Removes every card that appears in `other`.
    pub fn difference(&mut self, other: &Deck) {
        self.cards.retain(|c| !other.contains(*c));
    }

    pub fn mark(&mut self, i: usize, marked: bool) -> bool {
        match self.cards.get_mut(i) {
            Some(c) => {
                c.marked = marked;
                true
            }
            None => false,
        }
    }

    pub fn mark_all(&mut self) {
        self.cards.iter_mut().for_each(|c| c.marked = true);
    }

    pub fn unmark_all(&mut self) {
        self.cards.iter_mut().for_each(|c| c.marked = false);
    }

    pub fn marked_count(&self) -> usize {
        self.cards.iter().filter(|c| c.marked).count()
    }

    /// The marked cards, unmarked, in collection order.
    pub fn get_marked(&self) -> Deck {
        Deck {
            cards: self
                .cards
                .iter()
                .filter(|c| c.marked)
                .map(|c| Card::new(c.rank, c.suit))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn cut_swaps_halves() {
        let mut d = Deck::new_full();
        let before = d.clone();
        d.cut();
        assert_eq!(d.get(0), before.get(26));
        assert_eq!(d.get(26), before.get(0));
        assert_eq!(d.len(), 52);
    }

    #[test]
    fn deal_stops_when_exhausted() {
        let mut d = Deck::canonical(Category::Flush);
        let hand = d.deal(8);
        assert_eq!(hand.len(), 5);
        assert!(d.is_empty());
        assert_eq!(d.draw(), Err(GameError::EmptyDeck));
    }

    #[test]
    fn draw_random_removes_card() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut d = Deck::new_full();
        let c = d.draw_random(&mut rng).unwrap();
        assert_eq!(d.len(), 51);
        assert!(!d.contains(c));
    }

    #[test]
    fn marking_selects_subset() {
        let mut hand = Deck::canonical(Category::TwoPair);
        hand.mark(0, true);
        hand.mark(2, true);
        assert!(!hand.mark(9, true));
        let marked = hand.get_marked();
        assert_eq!(marked.len(), 2);
        assert!(marked.is_subset(&hand));
        assert!(marked.iter().all(|c| !c.marked));
        hand.difference(&marked);
        assert_eq!(hand.len(), 3);
        assert_eq!(hand.marked_count(), 0);
    }
}

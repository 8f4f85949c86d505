use std::collections::HashSet;

use drawpoker_engine::cards::Card;
use drawpoker_engine::deck::Deck;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn distinct(deck: &Deck) -> HashSet<Card> {
    deck.iter().copied().collect()
}

#[test]
fn shuffle_is_a_permutation() {
    for seed in 0..20u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut deck = Deck::new_full();
        deck.shuffle(2048, &mut rng);
        assert_eq!(deck.len(), 52);
        assert_eq!(distinct(&deck).len(), 52, "seed {seed} duplicated a card");

        deck.shuffle_uniform(&mut rng);
        deck.cut();
        assert_eq!(distinct(&deck).len(), 52);
    }
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let d1 = Deck::new_shuffled(512, &mut ChaCha20Rng::seed_from_u64(12345));
    let d2 = Deck::new_shuffled(512, &mut ChaCha20Rng::seed_from_u64(12345));
    assert_eq!(d1, d2, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let d1 = Deck::new_shuffled(0, &mut ChaCha20Rng::seed_from_u64(1));
    let d2 = Deck::new_shuffled(0, &mut ChaCha20Rng::seed_from_u64(2));
    assert_ne!(
        d1, d2,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn successive_deals_never_share_a_card() {
    let mut rng = ChaCha20Rng::seed_from_u64(777);
    let mut deck = Deck::new_shuffled(2048, &mut rng);
    let first = deck.deal(5);
    let second = deck.deal(5);
    let rest = deck.deal(deck.len());
    assert!(deck.is_empty());
    assert_eq!(first.len() + second.len() + rest.len(), 52);

    let mut seen = HashSet::new();
    for c in first.iter().chain(&second).chain(&rest) {
        assert!(seen.insert(*c), "card {c} dealt twice");
    }
}

#[test]
fn union_and_difference_keep_cards_unique() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let mut deck = Deck::new_shuffled(0, &mut rng);
    let hand = deck.deal(5);
    let mut all = deck.clone();
    all.union(&hand);
    all.union(&hand);
    assert_eq!(all.len(), 52);
    all.difference(&hand);
    assert_eq!(all, deck);
}

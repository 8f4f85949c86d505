use drawpoker_engine::cards::{Card, Rank as R, Suit as S};
use drawpoker_engine::deck::Deck;
use drawpoker_engine::hand::{classify, compare_hands, evaluate_hand, Category};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn cards(text: &[&str]) -> Vec<Card> {
    text.iter().map(|s| s.parse().expect("card text")).collect()
}

#[test]
fn canonical_hands_classify_to_their_category() {
    for cat in Category::ALL {
        let hand = Deck::canonical(cat);
        assert_eq!(hand.len(), 5);
        assert_eq!(classify(hand.cards()), cat, "canonical {cat}");
    }
}

#[test]
fn royal_flush_from_text() {
    let hand = cards(&["10h", "Jh", "Qh", "Kh", "Ah"]);
    assert_eq!(classify(&hand), Category::RoyalFlush);
    assert_eq!(evaluate_hand(&hand).high, Some(R::Ace));
}

#[test]
fn supersets_never_classify_lower() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for cat in Category::ALL {
        let base = Deck::canonical(cat);
        for extra in 1..=5 {
            let mut rest = Deck::new_full();
            rest.difference(&base);
            rest.shuffle_uniform(&mut rng);
            let mut bigger = base.clone();
            bigger.union(&rest.deal(extra));
            assert!(
                classify(bigger.cards()) >= cat,
                "{cat} plus {extra} cards dropped to {}",
                classify(bigger.cards())
            );
        }
    }
}

#[test]
fn long_straight_flush_run_is_still_a_straight_flush() {
    let hand = cards(&["5s", "6s", "7s", "8s", "9s", "10s"]);
    assert_eq!(classify(&hand), Category::StraightFlush);
}

#[test]
fn two_sets_of_trips_make_a_full_house() {
    let hand = cards(&["4c", "4d", "4h", "9c", "9d", "9s"]);
    assert_eq!(classify(&hand), Category::FullHouse);
}

#[test]
fn flush_needs_five_of_a_suit() {
    let four = cards(&["2h", "5h", "9h", "Kh", "3c"]);
    assert_eq!(classify(&four), Category::HighCard);
    let seven = cards(&["2h", "5h", "9h", "Kh", "3c", "Jh", "4d"]);
    assert_eq!(classify(&seven), Category::Flush);
}

#[test]
fn category_ordering_is_correct() {
    let quads = evaluate_hand(Deck::canonical(Category::FourOfAKind).cards());
    let full_house = evaluate_hand(Deck::canonical(Category::FullHouse).cards());
    assert!(compare_hands(&quads, &full_house).is_gt());
    let mut previous = None;
    for cat in Category::ALL {
        let strength = evaluate_hand(Deck::canonical(cat).cards());
        if let Some(p) = previous {
            assert!(strength > p, "{cat} must beat the category below");
        }
        previous = Some(strength);
    }
}

#[test]
fn tie_break_uses_only_the_highest_card() {
    let kings = [
        Card::new(R::King, S::Clubs),
        Card::new(R::King, S::Hearts),
        Card::new(R::Two, S::Spades),
        Card::new(R::Three, S::Spades),
        Card::new(R::Ace, S::Diamonds),
    ];
    let nines = [
        Card::new(R::Nine, S::Clubs),
        Card::new(R::Nine, S::Hearts),
        Card::new(R::Queen, S::Spades),
        Card::new(R::Jack, S::Spades),
        Card::new(R::Ace, S::Clubs),
    ];
    let a = evaluate_hand(&kings);
    let b = evaluate_hand(&nines);
    assert_eq!(a.category, Category::Pair);
    // same category, same highest card: not distinguished
    assert!(compare_hands(&a, &b).is_eq());
}

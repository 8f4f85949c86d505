use drawpoker_engine::errors::GameError;
use drawpoker_engine::ledger::PlayerLedger;
use drawpoker_engine::player::{Player, STARTING_STACK};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn players_start_with_100_and_empty_hands() {
    let ledger = PlayerLedger::new(4, STARTING_STACK);
    assert_eq!(ledger.len(), 4);
    assert!(ledger
        .players()
        .iter()
        .all(|p| p.stack() == 100 && p.hand.is_empty() && p.is_active()));
    assert_eq!(ledger.total_chips(), 400);
}

#[test]
fn unknown_seat_is_an_error() {
    let mut ledger = PlayerLedger::new(2, 10);
    assert_eq!(ledger.get(2).err(), Some(GameError::UnknownSeat { seat: 2 }));
    assert_eq!(ledger.set_first(5), Err(GameError::UnknownSeat { seat: 5 }));
}

#[test]
fn next_under_only_returns_players_who_owe() {
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    for _ in 0..500 {
        let n = rng.random_range(2..=8);
        let mut ledger = PlayerLedger::new(n, 1000);
        for seat in 0..n {
            let p: &mut Player = ledger.get_mut(seat).expect("seat");
            p.charge(rng.random_range(0..20)).expect("stack covers bet");
            if seat > 0 && rng.random_bool(0.3) {
                p.fold();
            }
        }
        let call = rng.random_range(0..25);
        let settled = ledger
            .players()
            .iter()
            .filter(|p| p.is_active())
            .all(|p| p.bet() >= call);

        match ledger.next_under(call) {
            Some(seat) => {
                let p = ledger.get(seat).expect("seat");
                assert!(p.is_active());
                assert!(p.bet() < call, "seat {seat} bet {} call {call}", p.bet());
                assert!(!settled);
            }
            None => assert!(settled),
        }
    }
}

#[test]
fn next_under_treats_all_in_as_settled() {
    let mut ledger = PlayerLedger::new(3, 30);
    let short = ledger.get_mut(1).expect("seat");
    short.charge(10).expect("covered");
    short.end_betting_round();
    assert_eq!(short.charge_all(), 20);
    ledger.get_mut(0).expect("seat").charge(25).expect("covered");
    ledger.get_mut(2).expect("seat").charge(25).expect("covered");
    assert_eq!(ledger.next_under(25), None);
    assert_eq!(ledger.next_under(26), Some(2));
}

#[test]
fn first_actor_rotates_past_busted_seats() {
    let mut ledger = PlayerLedger::new(4, 10);
    ledger.get_mut(1).expect("seat").charge_all();
    ledger.get_mut(2).expect("seat").charge_all();
    ledger.bring_all_in();
    assert_eq!(ledger.num_active(), 2);
    ledger.rotate_first();
    assert_eq!(ledger.first(), 3);
    ledger.rotate_first();
    assert_eq!(ledger.first(), 0);
    ledger.reset();
    assert_eq!(ledger.turn(), 0);
}

#[test]
fn one_in_after_everyone_else_folds() {
    let mut ledger = PlayerLedger::new(3, 10);
    ledger.get_mut(0).expect("seat").fold();
    ledger.get_mut(1).expect("seat").fold();
    assert_eq!(ledger.one_in().map(|p| p.index()), Some(2));
    ledger.reset();
    assert_eq!(ledger.turn(), 2);
    assert_eq!(ledger.next().seat, 2);
}

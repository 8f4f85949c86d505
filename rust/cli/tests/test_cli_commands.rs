use drawpoker_cli::run;
use serial_test::serial;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("drawpoker").chain(args.iter().copied());
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).expect("utf8 stdout"),
        String::from_utf8(err).expect("utf8 stderr"),
    )
}

fn clear_env() {
    for key in [
        "DRAWPOKER_CONFIG",
        "DRAWPOKER_SEED",
        "DRAWPOKER_STACK",
        "DRAWPOKER_ROUNDS",
        "DRAWPOKER_PLAYERS",
    ] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn deal_with_seed_is_reproducible() {
    clear_env();
    let first = run_cli(&["deal", "--seed", "7", "--players", "4"]);
    let second = run_cli(&["deal", "--seed", "7", "--players", "4"]);
    assert_eq!(first.0, 0, "stderr: {}", first.2);
    assert_eq!(first.1, second.1);
    assert!(first.1.contains("P4: ["));
    assert!(first.1.contains("Deck: 32 cards left"));
}

#[test]
fn eval_classifies_every_category() {
    let cases: &[(&[&str], &str)] = &[
        (&["2c", "5d", "9h", "Js", "Kc"], "high card"),
        (&["2c", "2d", "9h", "Js", "Kc"], "pair"),
        (&["2c", "2d", "9h", "9s", "Kc"], "two pair"),
        (&["2c", "2d", "2h", "9s", "Kc"], "three of a kind"),
        (&["5c", "6d", "7h", "8s", "9c"], "straight"),
        (&["2h", "5h", "9h", "Jh", "Kh"], "flush"),
        (&["2c", "2d", "2h", "9s", "9c"], "full house"),
        (&["2c", "2d", "2h", "2s", "9c"], "four of a kind"),
        (&["5d", "6d", "7d", "8d", "9d"], "straight flush"),
        (&["10c", "Jc", "Qc", "Kc", "Ac"], "royal flush"),
    ];
    for (cards, category) in cases {
        let mut args = vec!["eval"];
        args.extend_from_slice(cards);
        let (code, out, err) = run_cli(&args);
        assert_eq!(code, 0, "stderr: {err}");
        assert!(
            out.contains(&format!("Category: {}\n", category)),
            "{cards:?} gave {out}"
        );
    }
}

#[test]
fn eval_rejects_bad_cards() {
    let (code, _, err) = run_cli(&["eval", "As", "1z"]);
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse card '1z'"));
}

#[test]
#[serial]
fn sim_runs_requested_hands() {
    clear_env();
    let (code, out, err) = run_cli(&[
        "sim", "--hands", "12", "--seed", "3", "--players", "4", "--ai", "baseline,passive",
    ]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.starts_with("sim: hands=12 seed=3 players=4 ai=baseline,passive,baseline,passive"));
    assert!(out.contains("Simulated: 12 hands"));
    assert!(out.contains("P4 (passive): "));
}

#[test]
#[serial]
fn verbose_sim_narrates_each_hand() {
    clear_env();
    let (code, out, _) = run_cli(&[
        "sim", "--hands", "2", "--seed", "5", "--ai", "passive", "--verbose",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Hand 1\n-- BET_CHECK pot=0 open bet=0"));
    assert!(out.contains("Hand 2"));
    assert!(out.contains("-- DISCARD"));
    assert_eq!(out.matches("Stacks: P1=100 P2=100").count(), 2);
}

#[test]
#[serial]
fn sim_with_unknown_ai_fails() {
    clear_env();
    let (code, _, err) = run_cli(&["sim", "--hands", "1", "--ai", "shark"]);
    assert_eq!(code, 2);
    assert!(err.contains("unknown AI 'shark'"));
}

#[test]
#[serial]
fn ai_play_needs_no_stdin() {
    clear_env();
    let (code, out, err) = run_cli(&[
        "play", "--vs", "ai", "--hands", "2", "--seed", "9", "--ai", "passive", "--rounds", "2",
    ]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.contains("play: vs=ai hands=2 seed=9 players=2"));
    assert!(out.contains("Hands played: 2"));
    // three betting rounds of two checks per hand
    assert_eq!(out.matches("P1 checks").count(), 6);
}

#[test]
fn bad_arguments_exit_with_2() {
    let (code, out, err) = run_cli(&["deal", "--players", "12"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Commands:"));
}

#[test]
fn version_prints_to_stdout() {
    let (code, out, _) = run_cli(&["--version"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("drawpoker"));
}

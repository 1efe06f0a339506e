use akq_rs::agents::BotProfile;
use akq_rs::cards::Card;
use akq_rs::game::{Action, CoinFace, Role, RoundError, StateError};
use akq_rs::rng::ScriptedRng;
use akq_rs::session::{Prompt, Session, StepReport};

// Dealer draws of 0.1 land heads and deal the human the Ace, the opponent the Queen.
fn session(bot_draw: f64) -> Session {
    Session::builder()
        .source(Box::new(ScriptedRng::constant(0.1)))
        .bot_rng(Box::new(ScriptedRng::constant(bot_draw)))
        .build()
        .unwrap()
}

fn prompt(report: StepReport) -> Prompt {
    match report {
        StepReport::InProgress(p) => p,
        other => panic!("expected a prompt, got {other:?}"),
    }
}

#[test]
fn won_toss_opens_as_player_one() {
    let mut s = session(0.5);
    let toss = s.toss(CoinFace::Heads).unwrap();
    assert!(toss.toss.human_won());
    assert_eq!(toss.human_role, Role::Player1);
    assert_eq!(toss.human_card, Card::Ace);
    assert_eq!(toss.message(), "Coin landed on H. You are Player 1 (Act First)");

    let p = prompt(s.step(None).unwrap());
    assert_eq!(p.message, "You are Player 1. Action?");
    assert_eq!(p.options, &[Action::Check, Action::Bet]);
    assert_eq!(p.pot, 2);
    assert_eq!(p.opponent_move, None);

    let outcome = match s.step(Some(Action::Bet)).unwrap() {
        StepReport::Finished(o) => o,
        other => panic!("round should be over, got {other:?}"),
    };
    assert!(outcome.human_won());
    assert_eq!(outcome.pot, 3);
    assert_eq!(outcome.opponent_card, Card::Queen);
    assert_eq!(outcome.reason.to_string(), "Computer Folded");
}

#[test]
fn lost_toss_lets_the_computer_open() {
    // Queen opening bets below 0.3
    let mut s = session(0.1);
    let toss = s.toss(CoinFace::Tails).unwrap();
    assert_eq!(toss.human_role, Role::Player2);
    assert_eq!(toss.message(), "Coin landed on H. You are Player 2 (Act Second)");

    let p = prompt(s.step(None).unwrap());
    assert_eq!(p.opponent_move, Some(Action::Bet));
    assert_eq!(p.message, "Computer Bets $1. Your action?");
    assert_eq!(p.options, &[Action::Call, Action::Fold]);
    assert_eq!(p.pot, 3);

    let outcome = match s.step(Some(Action::Call)).unwrap() {
        StepReport::Finished(o) => o,
        other => panic!("round should be over, got {other:?}"),
    };
    assert_eq!(outcome.pot, 4);
    assert_eq!(outcome.money_message(), "You won $4");
    assert_eq!(outcome.reason.to_string(), "Showdown: A beats Q");
}

#[test]
fn computer_check_then_bet_then_fold() {
    let mut s = session(0.99);
    s.toss(CoinFace::Tails).unwrap();

    let p = prompt(s.step(None).unwrap());
    assert_eq!(p.message, "Computer Checks. Your action?");
    assert_eq!(p.options, &[Action::Check, Action::Bet]);

    // Queen never calls after check-bet
    let report = s.step(Some(Action::Bet)).unwrap();
    let StepReport::Finished(outcome) = report else {
        panic!("round should be over");
    };
    assert_eq!(outcome.history, vec![Action::Check, Action::Bet, Action::Fold]);
    assert_eq!(outcome.pot, 3);
    assert!(outcome.human_won());
}

#[test]
fn illegal_step_is_rejected_without_side_effects() {
    let mut s = session(0.5);
    s.toss(CoinFace::Heads).unwrap();
    assert!(s.step(Some(Action::Fold)).is_err());
    assert!(s.round().unwrap().history().is_empty());
    assert_eq!(s.round().unwrap().pot(), 2);
}

#[test]
fn step_before_toss_reports_no_round() {
    let mut s = session(0.5);
    assert_eq!(s.step(None).unwrap_err(), RoundError::State(StateError::NoRound));
    assert_eq!(s.outcome().unwrap_err(), RoundError::State(StateError::NoRound));
}

#[test]
fn delayed_computer_is_reported_as_waiting() {
    let mut s = Session::builder()
        .source(Box::new(ScriptedRng::constant(0.1)))
        .bot(BotProfile::default().with_delay_ms(60_000))
        .build()
        .unwrap();
    s.toss(CoinFace::Tails).unwrap();
    let p = prompt(s.step(None).unwrap());
    assert_eq!(p.message, "Waiting for computer...");
    assert!(p.options.is_empty());
    assert!(s.submit(Action::Check).is_err(), "not the human's turn");
}

#[test]
fn seeded_sessions_play_identical_rounds() {
    let play = |seed: u64| {
        let mut s = Session::builder().seed(seed).build().unwrap();
        s.toss(CoinFace::Heads).unwrap();
        let mut report = s.step(None).unwrap();
        while let StepReport::InProgress(p) = report {
            report = s.step(Some(p.options[0])).unwrap();
        }
        report
    };
    assert_eq!(play(42), play(42));
}

#[test]
fn reset_allows_a_fresh_toss() {
    let mut s = session(0.5);
    s.toss(CoinFace::Heads).unwrap();
    s.step(Some(Action::Bet)).unwrap();
    assert!(!s.in_progress());
    // A finished round does not block the next toss
    assert!(s.toss(CoinFace::Heads).is_ok());
    s.reset();
    assert!(s.round().is_none());
    assert_eq!(s.last_toss(), None);
}

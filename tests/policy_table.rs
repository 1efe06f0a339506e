use akq_rs::cards::Card;
use akq_rs::game::{Action, Role, StateError};
use akq_rs::policy::{decide, Context, PolicyTable, Rule, RuleError};
use akq_rs::rng::{ScriptedRng, JUST_BELOW_ONE};

use Action::{Bet, Call, Check, Fold};

/// (context, card, draw, expected) for the default table.
const CASES: &[(Context, Card, f64, Action)] = &[
    (Context::Opening, Card::Ace, 0.0, Bet),
    (Context::Opening, Card::Ace, 0.89, Bet),
    (Context::Opening, Card::Ace, 0.9, Check),
    (Context::Opening, Card::King, 0.0, Check),
    (Context::Opening, Card::King, JUST_BELOW_ONE, Check),
    (Context::Opening, Card::Queen, 0.29, Bet),
    (Context::Opening, Card::Queen, 0.3, Check),
    (Context::RespondingAfterCheck, Card::Ace, JUST_BELOW_ONE, Call),
    (Context::RespondingAfterCheck, Card::King, 0.39, Call),
    (Context::RespondingAfterCheck, Card::King, 0.4, Fold),
    (Context::RespondingAfterCheck, Card::Queen, 0.0, Fold),
    (Context::AfterCheck, Card::Ace, JUST_BELOW_ONE, Bet),
    (Context::AfterCheck, Card::King, 0.19, Bet),
    (Context::AfterCheck, Card::King, 0.2, Check),
    (Context::AfterCheck, Card::Queen, 0.29, Bet),
    (Context::AfterCheck, Card::Queen, 0.3, Check),
    (Context::FacingBet, Card::Ace, JUST_BELOW_ONE, Call),
    (Context::FacingBet, Card::King, 0.39, Call),
    (Context::FacingBet, Card::King, 0.4, Fold),
    (Context::FacingBet, Card::Queen, 0.0, Fold),
];

#[test]
fn default_table_cells() {
    for &(ctx, card, draw, expected) in CASES {
        let mut rng = ScriptedRng::constant(draw);
        let got = decide(card, ctx.history(), ctx.role(), &mut rng).unwrap();
        assert_eq!(got, expected, "{ctx} {card} at {draw}");
    }
}

#[test]
fn contexts_map_to_their_histories() {
    assert_eq!(Context::classify(&[], Role::Player1), Some(Context::Opening));
    assert_eq!(Context::classify(&[Check], Role::Player2), Some(Context::AfterCheck));
    assert_eq!(Context::classify(&[Bet], Role::Player2), Some(Context::FacingBet));
    assert_eq!(
        Context::classify(&[Check, Bet], Role::Player1),
        Some(Context::RespondingAfterCheck)
    );
    assert_eq!(Context::classify(&[Check], Role::Player1), None);
    assert_eq!(Context::classify(&[Bet, Call], Role::Player1), None);
}

#[test]
fn fixed_rules_consume_no_draw() {
    let mut rng = ScriptedRng::new([0.95, 0.1]);
    // King opening is a fixed check
    assert_eq!(decide(Card::King, &[], Role::Player1, &mut rng).unwrap(), Check);
    assert_eq!(rng.remaining(), 2);
    // Ace opening is mixed and consumes 0.95
    assert_eq!(decide(Card::Ace, &[], Role::Player1, &mut rng).unwrap(), Check);
    assert_eq!(rng.remaining(), 1);
}

#[test]
fn no_decision_outside_the_opponent_contexts() {
    let mut rng = ScriptedRng::constant(0.5);
    let err = decide(Card::Ace, &[Bet, Call], Role::Player1, &mut rng).unwrap_err();
    assert_eq!(err, StateError::NoDecision { role: Role::Player1, history: vec![Bet, Call] });
}

#[test]
fn custom_rules_are_validated() {
    let table = PolicyTable::default();
    let err = table
        .clone()
        .with_rule(Context::FacingBet, Card::Queen, Rule::always(Check))
        .unwrap_err();
    assert_eq!(err, RuleError::IllegalAction { context: Context::FacingBet, action: Check });

    let err = table
        .clone()
        .with_rule(Context::Opening, Card::Queen, Rule::mixed(Bet, 1.5, Check))
        .unwrap_err();
    assert_eq!(err, RuleError::Probability(1.5));

    let tuned = table.with_rule(Context::FacingBet, Card::Queen, Rule::always(Call)).unwrap();
    let mut rng = ScriptedRng::constant(0.5);
    assert_eq!(tuned.decide(Card::Queen, &[Bet], Role::Player2, &mut rng).unwrap(), Call);
    assert_eq!(tuned.iter().count(), 12);
}

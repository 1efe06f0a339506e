use akq_rs::cards::Card;
use akq_rs::game::{
    is_terminal_history, legal_after, start_round, Action, CoinFace, Role, RoundState, Side,
    MAX_HISTORY, STARTING_POT,
};
use akq_rs::policy::{Context, PolicyTable};
use akq_rs::rng::{ScriptedRng, SeededRng, JUST_BELOW_ONE};
use proptest::prelude::*;

fn any_card() -> impl Strategy<Value = Card> {
    prop_oneof![Just(Card::Ace), Just(Card::King), Just(Card::Queen)]
}

fn any_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Player1), Just(Role::Player2)]
}

fn any_face() -> impl Strategy<Value = CoinFace> {
    prop_oneof![Just(CoinFace::Heads), Just(CoinFace::Tails)]
}

prop_compose! {
    fn distinct_cards()(a in any_card(), b in any_card()) -> (Card, Card) {
        if a != b {
            (a, b)
        } else {
            let other = Card::ALL.into_iter().find(|&c| c != a).unwrap();
            (a, other)
        }
    }
}

const TERMINAL_LINES: [&[Action]; 5] = [
    &[Action::Check, Action::Check],
    &[Action::Bet, Action::Call],
    &[Action::Bet, Action::Fold],
    &[Action::Check, Action::Bet, Action::Call],
    &[Action::Check, Action::Bet, Action::Fold],
];

/// Play to the end: the human picks `choices[i] % legal.len()`, the opponent draws from `draws`.
fn play_out(mut round: RoundState, choices: &[usize], draws: &[f64]) -> RoundState {
    let mut rng = ScriptedRng::new(draws.iter().copied());
    let table = PolicyTable::default();
    let mut human_turns = choices.iter().copied();
    for _ in 0..MAX_HISTORY {
        match round.next_side() {
            Some(Side::Human) => {
                let legal = round.legal_actions();
                let pick = human_turns.next().unwrap_or(0) % legal.len();
                round.apply_action(legal[pick]).unwrap();
            }
            Some(Side::Opponent) => {
                round.play_opponent(&table, &mut rng).unwrap();
            }
            None => break,
        }
        let paid = round.history().iter().filter(|a| a.adds_to_pot()).count() as u64;
        assert_eq!(round.pot(), STARTING_POT + paid, "pot after {:?}", round.history());
    }
    round
}

proptest! {
    #[test]
    fn every_round_ends_on_a_known_line(
        (human, opponent) in distinct_cards(),
        role in any_role(),
        choices in prop::collection::vec(0usize..4, 3),
        draws in prop::collection::vec(0.0f64..1.0, 3),
    ) {
        let round = RoundState::with_cards(human, opponent, role).unwrap();
        let done = play_out(round, &choices, &draws);
        prop_assert!(done.is_terminal());
        prop_assert!(done.history().len() <= MAX_HISTORY);
        prop_assert!(TERMINAL_LINES.iter().any(|line| *line == done.history()));
        prop_assert!(done.legal_actions().is_empty());
    }

    #[test]
    fn pot_is_antes_plus_bets_and_calls(
        (human, opponent) in distinct_cards(),
        role in any_role(),
        choices in prop::collection::vec(0usize..4, 3),
        draws in prop::collection::vec(0.0f64..1.0, 3),
    ) {
        let round = RoundState::with_cards(human, opponent, role).unwrap();
        let done = play_out(round, &choices, &draws);
        let paid = done.history().iter().filter(|a| a.adds_to_pot()).count() as u64;
        prop_assert_eq!(done.pot(), STARTING_POT + paid);
        prop_assert!((2..=4).contains(&done.pot()));
        let outcome = done.resolve().unwrap();
        prop_assert_eq!(outcome.pot, done.pot());
    }

    #[test]
    fn showdown_goes_to_the_higher_card(
        (human, opponent) in distinct_cards(),
        role in any_role(),
        choices in prop::collection::vec(0usize..4, 3),
        draws in prop::collection::vec(0.0f64..1.0, 3),
    ) {
        let round = RoundState::with_cards(human, opponent, role).unwrap();
        let done = play_out(round, &choices, &draws);
        let outcome = done.resolve().unwrap();
        if done.history().last() != Some(&Action::Fold) {
            let expected = if human > opponent { Side::Human } else { Side::Opponent };
            prop_assert_eq!(outcome.winner_side, expected);
        }
        prop_assert_eq!(outcome.winner, done.role_of(outcome.winner_side));
    }

    #[test]
    fn seeded_deals_are_distinct_and_replayable(seed in any::<u64>(), call in any_face()) {
        let (a, toss_a) = start_round(call, &mut SeededRng::from_seed(seed)).unwrap();
        let (b, toss_b) = start_round(call, &mut SeededRng::from_seed(seed)).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(toss_a, toss_b);
        prop_assert_eq!(a.revealed_opponent_card(), None);
        let outcome = play_out(a.clone(), &[0, 0, 0], &[0.5]).resolve().unwrap();
        prop_assert_eq!(outcome.human_card, a.human_card());
        prop_assert_ne!(outcome.human_card, outcome.opponent_card);
        prop_assert_eq!(a.human_role(), toss_a.human_role());
        prop_assert_eq!(a.pot(), STARTING_POT);
        prop_assert_eq!(a.human_role() == Role::Player1, toss_a.call == toss_a.result);
    }

    #[test]
    fn opponent_decisions_are_always_legal(card in any_card(), draw in 0.0f64..1.0) {
        let table = PolicyTable::default();
        for ctx in Context::ALL {
            for d in [0.0, draw, JUST_BELOW_ONE] {
                let mut rng = ScriptedRng::constant(d);
                let action = table.decide(card, ctx.history(), ctx.role(), &mut rng).unwrap();
                prop_assert!(legal_after(ctx.history()).contains(&action));
            }
        }
    }
}

#[test]
fn terminal_lines_have_no_legal_actions() {
    for line in TERMINAL_LINES {
        assert!(is_terminal_history(line));
        assert!(legal_after(line).is_empty());
    }
    assert!(!is_terminal_history(&[Action::Check]));
    assert!(!is_terminal_history(&[Action::Check, Action::Bet]));
}

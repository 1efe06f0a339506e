//! Opponent policy: a lookup table from (decision context, card) to a rule.
//!
//! A rule names an action, the alternative, and the probability of picking the
//! action. Mixed rules consume one uniform draw and pick the action iff
//! `draw < probability`; fixed rules consume nothing. Every rule in a table is
//! checked against the legal actions of its context, so [`PolicyTable::decide`]
//! can only produce a legal action.

use crate::cards::Card;
use crate::game::{legal_after, Action, Role, StateError};
use crate::rng::RandomSource;
use std::fmt;

/// The four places the opponent can be asked to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Player 1, empty history.
    Opening,
    /// Player 1 after `[Check, Bet]`.
    RespondingAfterCheck,
    /// Player 2 after `[Check]`.
    AfterCheck,
    /// Player 2 after `[Bet]`.
    FacingBet,
}

impl Context {
    pub const ALL: [Context; 4] =
        [Context::Opening, Context::RespondingAfterCheck, Context::AfterCheck, Context::FacingBet];

    pub fn classify(history: &[Action], role: Role) -> Option<Context> {
        use Action::*;
        match (role, history) {
            (Role::Player1, []) => Some(Context::Opening),
            (Role::Player1, [Check, Bet]) => Some(Context::RespondingAfterCheck),
            (Role::Player2, [Check]) => Some(Context::AfterCheck),
            (Role::Player2, [Bet]) => Some(Context::FacingBet),
            _ => None,
        }
    }

    pub const fn role(self) -> Role {
        match self {
            Context::Opening | Context::RespondingAfterCheck => Role::Player1,
            Context::AfterCheck | Context::FacingBet => Role::Player2,
        }
    }

    /// The history that leads here.
    pub const fn history(self) -> &'static [Action] {
        match self {
            Context::Opening => &[],
            Context::RespondingAfterCheck => &[Action::Check, Action::Bet],
            Context::AfterCheck => &[Action::Check],
            Context::FacingBet => &[Action::Bet],
        }
    }

    pub fn legal_actions(self) -> &'static [Action] {
        legal_after(self.history())
    }

    const fn index(self) -> usize {
        match self {
            Context::Opening => 0,
            Context::RespondingAfterCheck => 1,
            Context::AfterCheck => 2,
            Context::FacingBet => 3,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Context::Opening => "opening",
            Context::RespondingAfterCheck => "check then bet",
            Context::AfterCheck => "after check",
            Context::FacingBet => "facing bet",
        };
        f.write_str(s)
    }
}

/// `action` with `probability`, else `otherwise`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub action: Action,
    pub otherwise: Action,
    pub probability: f64,
}

impl Rule {
    pub const fn always(action: Action) -> Self {
        Self { action, otherwise: action, probability: 1.0 }
    }

    pub const fn mixed(action: Action, probability: f64, otherwise: Action) -> Self {
        Self { action, otherwise, probability }
    }

    pub fn is_mixed(&self) -> bool {
        self.action != self.otherwise && self.probability > 0.0 && self.probability < 1.0
    }

    /// Resolve against a unit draw; a draw equal to the threshold takes the alternative.
    pub fn pick(&self, draw: f64) -> Action {
        if draw < self.probability {
            self.action
        } else {
            self.otherwise
        }
    }

    fn choose(&self, rng: &mut dyn RandomSource) -> Action {
        if !self.is_mixed() {
            return self.pick(0.0);
        }
        let draw = rng.unit();
        let action = self.pick(draw);
        log::debug!(
            "policy draw {draw:.4} vs {:.2}: {action} (else {})",
            self.probability,
            self.otherwise
        );
        action
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("{action} is not legal when {context}")]
    IllegalAction { context: Context, action: Action },
    #[error("probability must be within [0, 1], got {0}")]
    Probability(f64),
}

use Action::{Bet, Call, Check, Fold};

/// Rows follow [`Context::ALL`], columns follow [`Card::ALL`] (Ace, King, Queen).
const DEFAULT_RULES: [[Rule; 3]; 4] = [
    // Opening: value-bet the Ace, check the King, bluff the Queen sometimes.
    [Rule::mixed(Bet, 0.9, Check), Rule::always(Check), Rule::mixed(Bet, 0.3, Check)],
    // Player 1 after check-bet.
    [Rule::always(Call), Rule::mixed(Call, 0.4, Fold), Rule::always(Fold)],
    // Player 2 after a check.
    [Rule::always(Bet), Rule::mixed(Bet, 0.2, Check), Rule::mixed(Bet, 0.3, Check)],
    // Player 2 facing a bet.
    [Rule::always(Call), Rule::mixed(Call, 0.4, Fold), Rule::always(Fold)],
];

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    rules: [[Rule; 3]; 4],
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self { rules: DEFAULT_RULES }
    }
}

impl PolicyTable {
    pub fn rule(&self, context: Context, card: Card) -> Rule {
        self.rules[context.index()][card.index()]
    }

    /// Replace one cell after checking both actions are legal in `context`.
    pub fn set_rule(&mut self, context: Context, card: Card, rule: Rule) -> Result<(), RuleError> {
        if !(0.0..=1.0).contains(&rule.probability) {
            return Err(RuleError::Probability(rule.probability));
        }
        let legal = context.legal_actions();
        for action in [rule.action, rule.otherwise] {
            if !legal.contains(&action) {
                return Err(RuleError::IllegalAction { context, action });
            }
        }
        self.rules[context.index()][card.index()] = rule;
        Ok(())
    }

    pub fn with_rule(mut self, context: Context, card: Card, rule: Rule) -> Result<Self, RuleError> {
        self.set_rule(context, card, rule)?;
        Ok(self)
    }

    /// Every cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Context, Card, Rule)> + '_ {
        Context::ALL
            .into_iter()
            .flat_map(move |ctx| Card::ALL.into_iter().map(move |card| (ctx, card, self.rule(ctx, card))))
    }

    /// Pick the opponent's action for `card` in `role` after `history`.
    pub fn decide(
        &self,
        card: Card,
        history: &[Action],
        role: Role,
        rng: &mut dyn RandomSource,
    ) -> Result<Action, StateError> {
        let context = Context::classify(history, role)
            .ok_or_else(|| StateError::NoDecision { role, history: history.to_vec() })?;
        let action = self.rule(context, card).choose(rng);
        log::debug!("opponent {card} as {role} ({context}): {action}");
        Ok(action)
    }
}

/// [`PolicyTable::decide`] with the default table.
///
/// ```
/// use akq_rs::cards::Card;
/// use akq_rs::game::{Action, Role};
/// use akq_rs::policy::decide;
/// use akq_rs::rng::ScriptedRng;
///
/// let mut rng = ScriptedRng::constant(0.99);
/// let action = decide(Card::King, &[Action::Bet], Role::Player2, &mut rng).unwrap();
/// assert_eq!(action, Action::Fold);
/// ```
pub fn decide(
    card: Card,
    history: &[Action],
    role: Role,
    rng: &mut dyn RandomSource,
) -> Result<Action, StateError> {
    PolicyTable::default().decide(card, history, role, rng)
}

use crate::cards::Card;
use crate::deck::Deck;
use crate::policy::PolicyTable;
use crate::rng::RandomSource;
use std::fmt;
use std::str::FromStr;

/// Each side antes one unit before the cards are seen.
pub const ANTE: u64 = 1;
/// Pot at the start of every round.
pub const STARTING_POT: u64 = 2 * ANTE;
/// Longest possible action log: `[Check, Bet, Call|Fold]`.
pub const MAX_HISTORY: usize = 3;

/// Seat order for a round. Player 1 always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player1,
    Player2,
}

impl Role {
    pub const fn other(self) -> Role {
        match self {
            Role::Player1 => Role::Player2,
            Role::Player2 => Role::Player1,
        }
    }

    /// Owner of the turn after `actions_taken` recorded actions.
    pub const fn for_turn(actions_taken: usize) -> Role {
        if actions_taken % 2 == 0 {
            Role::Player1
        } else {
            Role::Player2
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Player1 => "Player 1",
            Role::Player2 => "Player 2",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who sits in a role: the person at the keyboard or the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Opponent,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Side::Human => Side::Opponent,
            Side::Opponent => Side::Human,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Side::Human => "You",
            Side::Opponent => "Computer",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Opponent => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Check,
    Bet,
    Call,
    Fold,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Action::Check => "Check",
            Action::Bet => "Bet",
            Action::Call => "Call",
            Action::Fold => "Fold",
        }
    }

    /// Bet and Call each put one more unit in the pot.
    pub const fn adds_to_pot(self) -> bool {
        matches!(self, Action::Bet | Action::Call)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("invalid action: '{0}'")]
    Invalid(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check" | "k" | "x" => Ok(Action::Check),
            "bet" | "b" => Ok(Action::Bet),
            "call" | "c" => Ok(Action::Call),
            "fold" | "f" => Ok(Action::Fold),
            _ => Err(ActionParseError::Invalid(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinFace::Heads => f.write_str("H"),
            CoinFace::Tails => f.write_str("T"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoinParseError {
    #[error("invalid coin face: '{0}'")]
    Invalid(String),
}

impl FromStr for CoinFace {
    type Err = CoinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "heads" => Ok(CoinFace::Heads),
            "t" | "tails" => Ok(CoinFace::Tails),
            _ => Err(CoinParseError::Invalid(s.to_string())),
        }
    }
}

/// The human's call and where the coin landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toss {
    pub call: CoinFace,
    pub result: CoinFace,
}

impl Toss {
    pub fn human_won(&self) -> bool {
        self.call == self.result
    }

    /// The toss winner opens as Player 1.
    pub fn human_role(&self) -> Role {
        if self.human_won() {
            Role::Player1
        } else {
            Role::Player2
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("the round is already over")]
    RoundOver,
    #[error("{action} is not legal here; legal actions are {legal:?}")]
    NotLegal { action: Action, legal: &'static [Action] },
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("an action is already queued")]
    AlreadyQueued,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("the round is not over yet")]
    NotTerminal,
    #[error("a round is already in progress; reset it first")]
    RoundInProgress,
    #[error("no round has been dealt")]
    NoRound,
    #[error("both sides cannot hold the {0}")]
    DuplicateCard(Card),
    #[error("the deck ran out of cards")]
    DeckExhausted,
    #[error("no opponent decision for {role} after {history:?}")]
    NoDecision { role: Role, history: Vec<Action> },
    #[error("it is not the opponent's turn")]
    NotOpponentTurn,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Actions the next actor may take after `history`; empty once the round is over.
///
/// ```
/// use akq_rs::game::{legal_after, Action};
///
/// assert_eq!(legal_after(&[]), &[Action::Check, Action::Bet]);
/// assert_eq!(legal_after(&[Action::Check, Action::Bet]), &[Action::Call, Action::Fold]);
/// assert!(legal_after(&[Action::Check, Action::Check]).is_empty());
/// ```
pub fn legal_after(history: &[Action]) -> &'static [Action] {
    use Action::*;
    match history {
        [] | [Check] => &[Check, Bet],
        [Bet] | [Check, Bet] => &[Call, Fold],
        _ => &[],
    }
}

/// A round ends on any Call, any Fold, or Check-Check.
pub fn is_terminal_history(history: &[Action]) -> bool {
    matches!(history, [.., Action::Call] | [.., Action::Fold] | [Action::Check, Action::Check])
}

/// One logged action with who took it and the pot right after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub role: Role,
    pub side: Side,
    pub action: Action,
    pub pot: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutcomeReason {
    Folded { folder: Side },
    Showdown { winning_card: Card, losing_card: Card },
}

impl fmt::Display for OutcomeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeReason::Folded { folder } => write!(f, "{folder} Folded"),
            OutcomeReason::Showdown { winning_card, losing_card } => {
                write!(f, "Showdown: {winning_card} beats {losing_card}")
            }
        }
    }
}

/// Result of a finished round. The opponent card is revealed here and nowhere earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Outcome {
    pub winner: Role,
    pub winner_side: Side,
    pub reason: OutcomeReason,
    pub pot: u64,
    pub human_card: Card,
    pub opponent_card: Card,
    pub history: Vec<Action>,
}

impl Outcome {
    pub fn human_won(&self) -> bool {
        self.winner_side == Side::Human
    }

    pub fn money_message(&self) -> String {
        if self.human_won() {
            format!("You won ${}", self.pot)
        } else {
            format!("Computer won ${} (You lost)", self.pot)
        }
    }
}

/// Authoritative state of one round.
///
/// Owned by whoever hosts the round; every operation takes it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub(crate) human_card: Card,
    pub(crate) opponent_card: Card,
    pub(crate) human_role: Role,
    pub(crate) pot: u64,
    pub(crate) history: Vec<Action>,
    pub(crate) terminal: bool,
}

/// Toss the coin against the human's call, then deal.
///
/// ```
/// use akq_rs::game::{start_round, CoinFace, Role};
/// use akq_rs::rng::ScriptedRng;
///
/// // 0.1 lands heads; the rest drives the shuffle
/// let mut rng = ScriptedRng::constant(0.1);
/// let (round, toss) = start_round(CoinFace::Heads, &mut rng).unwrap();
/// assert!(toss.human_won());
/// assert_eq!(round.human_role(), Role::Player1);
/// assert_eq!(round.pot(), 2);
/// ```
pub fn start_round(
    call: CoinFace,
    rng: &mut dyn RandomSource,
) -> Result<(RoundState, Toss), StateError> {
    let toss = Toss { call, result: rng.flip() };
    let round = RoundState::deal(toss.human_role(), rng)?;
    log::info!(
        "toss: called {} landed {}; human is {}",
        toss.call,
        toss.result,
        round.human_role
    );
    Ok((round, toss))
}

impl RoundState {
    /// Shuffle the deck and give one card to each side; the third stays face down.
    pub fn deal(human_role: Role, rng: &mut dyn RandomSource) -> Result<Self, StateError> {
        let mut deck = Deck::standard();
        deck.shuffle_with(rng);
        match deck.draw_n(2)[..] {
            [human, opponent] => Self::with_cards(human, opponent, human_role),
            _ => Err(StateError::DeckExhausted),
        }
    }

    /// Fixed deal, for replays and tests.
    pub fn with_cards(
        human_card: Card,
        opponent_card: Card,
        human_role: Role,
    ) -> Result<Self, StateError> {
        if human_card == opponent_card {
            return Err(StateError::DuplicateCard(human_card));
        }
        log::debug!("dealt: human {human_card} as {human_role}, opponent card concealed");
        Ok(Self {
            human_card,
            opponent_card,
            human_role,
            pot: STARTING_POT,
            history: Vec::with_capacity(MAX_HISTORY),
            terminal: false,
        })
    }

    pub fn human_card(&self) -> Card {
        self.human_card
    }

    /// Opponent card, only once the round is over.
    pub fn revealed_opponent_card(&self) -> Option<Card> {
        self.terminal.then_some(self.opponent_card)
    }

    pub(crate) fn card_of(&self, side: Side) -> Card {
        match side {
            Side::Human => self.human_card,
            Side::Opponent => self.opponent_card,
        }
    }

    pub fn human_role(&self) -> Role {
        self.human_role
    }

    pub fn opponent_role(&self) -> Role {
        self.human_role.other()
    }

    pub fn role_of(&self, side: Side) -> Role {
        match side {
            Side::Human => self.human_role,
            Side::Opponent => self.human_role.other(),
        }
    }

    pub fn side_of(&self, role: Role) -> Side {
        if role == self.human_role {
            Side::Human
        } else {
            Side::Opponent
        }
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Role to act next, or `None` once the round is over.
    pub fn next_actor(&self) -> Option<Role> {
        if self.terminal {
            return None;
        }
        Some(Role::for_turn(self.history.len()))
    }

    pub fn next_side(&self) -> Option<Side> {
        self.next_actor().map(|role| self.side_of(role))
    }

    pub fn legal_actions(&self) -> &'static [Action] {
        if self.terminal {
            return &[];
        }
        legal_after(&self.history)
    }

    /// The only mutator: validate, grow the pot on Bet/Call, log, then re-check termination.
    pub fn apply_action(&mut self, action: Action) -> Result<(), ActionError> {
        if self.terminal {
            log::warn!("rejected {action}: round already over");
            return Err(ActionError::RoundOver);
        }
        let legal = self.legal_actions();
        if !legal.contains(&action) {
            log::warn!("rejected {action} after {:?}", self.history);
            return Err(ActionError::NotLegal { action, legal });
        }
        let role = Role::for_turn(self.history.len());
        if action.adds_to_pot() {
            self.pot += ANTE;
        }
        self.history.push(action);
        self.terminal = is_terminal_history(&self.history);
        log::debug!(
            "{} ({}) {action}; pot {} history {:?}",
            role,
            self.side_of(role),
            self.pot,
            self.history
        );
        Ok(())
    }

    /// Let the opponent policy act for the opponent's seat and apply its choice.
    pub fn play_opponent(
        &mut self,
        table: &PolicyTable,
        rng: &mut dyn RandomSource,
    ) -> Result<Action, RoundError> {
        if self.terminal {
            return Err(ActionError::RoundOver.into());
        }
        if self.next_side() != Some(Side::Opponent) {
            return Err(StateError::NotOpponentTurn.into());
        }
        let action = table.decide(self.opponent_card, &self.history, self.opponent_role(), rng)?;
        self.apply_action(action)?;
        Ok(action)
    }

    /// Who won and why. Only valid once the round is over.
    pub fn resolve(&self) -> Result<Outcome, StateError> {
        if !self.terminal {
            return Err(StateError::NotTerminal);
        }
        let (winner_side, reason) = match self.history.last() {
            Some(Action::Fold) => {
                let folder = self.side_of(Role::for_turn(self.history.len() - 1));
                (folder.other(), OutcomeReason::Folded { folder })
            }
            _ => {
                let winner = if self.human_card > self.opponent_card {
                    Side::Human
                } else {
                    Side::Opponent
                };
                let winning_card = self.card_of(winner);
                let losing_card = self.card_of(winner.other());
                (winner, OutcomeReason::Showdown { winning_card, losing_card })
            }
        };
        Ok(Outcome {
            winner: self.role_of(winner_side),
            winner_side,
            reason,
            pot: self.pot,
            human_card: self.human_card,
            opponent_card: self.opponent_card,
            history: self.history.clone(),
        })
    }

    /// The action log with actors and running pot.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let mut pot = STARTING_POT;
        self.history
            .iter()
            .enumerate()
            .map(|(i, &action)| {
                if action.adds_to_pot() {
                    pot += ANTE;
                }
                let role = Role::for_turn(i);
                HistoryEntry { role, side: self.side_of(role), action, pot }
            })
            .collect()
    }
}

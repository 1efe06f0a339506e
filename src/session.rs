//! Session facade for hosts: one human against the automated opponent.
//!
//! A `Session` owns the random source for tosses and deals, the current
//! [`RoundState`], and an [`AgentTable`] pairing a human agent with a
//! [`BotAgent`]. Hosts either drive it turn by turn (`submit` + `tick`, as the
//! TUI does so the bot can take its time) or request/response style with
//! [`Session::step`], which applies the human action and lets the opponent
//! answer before returning.

use crate::agents::{AgentTable, BotAgent, BotProfile, Turn};
use crate::cards::Card;
use crate::game::{
    start_round, Action, ActionError, CoinFace, Outcome, Role, RoundError, RoundState, Side,
    StateError, Toss,
};
use crate::rng::{RandomSource, SeededRng, SystemRng};
use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no random source configured; pick seed, entropy or an explicit source")]
    MissingRandomSource,
}

/// Builds a [`Session`]. A random source is required; there is no silent default.
#[derive(Default)]
pub struct SessionBuilder {
    source: Option<Box<dyn RandomSource>>,
    seed: Option<u64>,
    bot: BotProfile,
    bot_rng: Option<Box<dyn RandomSource>>,
    action_delay_ms: u64,
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("source", &self.source.is_some())
            .field("seed", &self.seed)
            .field("bot", &self.bot)
            .field("bot_rng", &self.bot_rng.is_some())
            .field("action_delay_ms", &self.action_delay_ms)
            .finish()
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible tosses and deals. Also seeds the bot unless its profile has a seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.source = Some(Box::new(SeededRng::from_seed(seed)));
        self.seed = Some(seed);
        self
    }

    /// Fresh entropy for every toss and deal.
    pub fn entropy(mut self) -> Self {
        self.source = Some(Box::new(SystemRng));
        self.seed = None;
        self
    }

    pub fn source(mut self, source: Box<dyn RandomSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn bot(mut self, profile: BotProfile) -> Self {
        self.bot = profile;
        self
    }

    /// Force the bot's draws, e.g. with a scripted source.
    pub fn bot_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.bot_rng = Some(rng);
        self
    }

    /// Minimum pause between bot actions when driven by `tick`.
    pub fn action_delay_ms(mut self, delay_ms: u64) -> Self {
        self.action_delay_ms = delay_ms;
        self
    }

    pub fn build(self) -> Result<Session, ConfigError> {
        let rng = self.source.ok_or(ConfigError::MissingRandomSource)?;
        let mut profile = self.bot;
        if profile.rng_seed.is_none() {
            // distinct stream from the dealer's
            profile.rng_seed = self.seed.map(|s| s.wrapping_add(1));
        }
        let bot = match self.bot_rng {
            Some(bot_rng) => BotAgent::with_rng(profile, bot_rng),
            None => BotAgent::new(profile),
        };
        let mut session = Session::new(rng, bot);
        session.agents.set_min_action_delay_ms(self.action_delay_ms);
        Ok(session)
    }
}

/// What the human learns from the toss: never the opponent's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TossReport {
    pub toss: Toss,
    pub human_role: Role,
    pub human_card: Card,
}

impl TossReport {
    pub fn message(&self) -> String {
        let seat = match self.human_role {
            Role::Player1 => "Player 1 (Act First)",
            Role::Player2 => "Player 2 (Act Second)",
        };
        format!("Coin landed on {}. You are {seat}", self.toss.result)
    }
}

/// Where a round stands after a step, when it is not over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Prompt {
    pub opponent_move: Option<Action>,
    pub message: String,
    /// Empty unless it is the human's turn.
    pub options: &'static [Action],
    pub pot: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepReport {
    InProgress(Prompt),
    Finished(Outcome),
}

pub struct Session {
    rng: Box<dyn RandomSource>,
    agents: AgentTable,
    round: Option<RoundState>,
    toss: Option<Toss>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("agents", &self.agents)
            .field("round", &self.round)
            .field("toss", &self.toss)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Direct construction when the caller already holds a source.
    pub fn new(rng: Box<dyn RandomSource>, bot: BotAgent) -> Self {
        Self { rng, agents: AgentTable::heads_up(bot), round: None, toss: None }
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn last_toss(&self) -> Option<Toss> {
        self.toss
    }

    /// Whether a dealt round is still waiting for actions.
    pub fn in_progress(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.is_terminal())
    }

    /// Toss, assign roles and deal. Refused while a round is still running.
    pub fn toss(&mut self, call: CoinFace) -> Result<TossReport, RoundError> {
        if self.in_progress() {
            log::warn!("toss refused: round in progress");
            return Err(StateError::RoundInProgress.into());
        }
        let (round, toss) = start_round(call, self.rng.as_mut())?;
        let report =
            TossReport { toss, human_role: round.human_role(), human_card: round.human_card() };
        self.agents.reset();
        self.round = Some(round);
        self.toss = Some(toss);
        Ok(report)
    }

    /// Abandon the current round, finished or not.
    pub fn reset(&mut self) {
        if self.in_progress() {
            log::info!("round abandoned");
        }
        self.round = None;
        self.toss = None;
        self.agents.reset();
    }

    /// Queue the human's action after checking it is theirs to take and legal.
    pub fn submit(&mut self, action: Action) -> Result<(), RoundError> {
        let round = self.round.as_ref().ok_or(StateError::NoRound)?;
        if round.is_terminal() {
            return Err(ActionError::RoundOver.into());
        }
        if round.next_side() != Some(Side::Human) {
            return Err(ActionError::NotYourTurn.into());
        }
        let legal = round.legal_actions();
        if !legal.contains(&action) {
            log::warn!("human tried {action} after {:?}", round.history());
            return Err(ActionError::NotLegal { action, legal }.into());
        }
        if !self.agents.receive(Side::Human, action) {
            return Err(ActionError::AlreadyQueued.into());
        }
        Ok(())
    }

    /// Drive whichever agent acts next, at most once.
    pub fn tick(&mut self) -> Result<Option<Turn>, RoundError> {
        let round = self.round.as_mut().ok_or(StateError::NoRound)?;
        let turn = self.agents.on_turn(round)?;
        if turn.is_some() && round.is_terminal() {
            let outcome = round.resolve()?;
            log::info!(
                "round over: {} ({}), pot {}",
                outcome.winner_side,
                outcome.reason,
                outcome.pot
            );
        }
        Ok(turn)
    }

    /// Apply `action` for the human (if given), let the opponent answer, and report.
    pub fn step(&mut self, action: Option<Action>) -> Result<StepReport, RoundError> {
        if let Some(action) = action {
            self.submit(action)?;
        }
        let mut opponent_move = None;
        while let Some(turn) = self.tick()? {
            if turn.side == Side::Opponent {
                opponent_move = Some(turn.action);
            }
        }
        self.report(opponent_move)
    }

    pub fn outcome(&self) -> Result<Outcome, RoundError> {
        let round = self.round.as_ref().ok_or(StateError::NoRound)?;
        Ok(round.resolve()?)
    }

    /// Describe the current round; `opponent_move` is the opponent's latest action, if the
    /// caller just saw one.
    pub fn report(&self, opponent_move: Option<Action>) -> Result<StepReport, RoundError> {
        let round = self.round.as_ref().ok_or(StateError::NoRound)?;
        if round.is_terminal() {
            return Ok(StepReport::Finished(round.resolve()?));
        }
        let human_turn = round.next_side() == Some(Side::Human);
        let message = match (opponent_move, human_turn) {
            (Some(Action::Bet), true) => "Computer Bets $1. Your action?".to_string(),
            (Some(Action::Check), true) => "Computer Checks. Your action?".to_string(),
            (_, true) if round.history().is_empty() => {
                format!("You are {}. Action?", round.human_role())
            }
            (_, true) => "Your action?".to_string(),
            (_, false) => "Waiting for computer...".to_string(),
        };
        let options = if human_turn { round.legal_actions() } else { &[] };
        Ok(StepReport::InProgress(Prompt { opponent_move, message, options, pot: round.pot() }))
    }
}

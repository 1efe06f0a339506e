//! Agents: pluggable controllers for the two sides of a round.
//!
//! `PlayerAgent` is the small trait a seat controller implements, and
//! `AgentTable` holds one optional agent per [`Side`] and drives whichever one
//! owns the next turn. Hosts (the TUI, the session facade) stay thin because the
//! turn bookkeeping lives here.

use crate::engine::RoundEngine;
use crate::game::{Action, RoundError, Side};
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// An action an agent actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub side: Side,
    pub action: Action,
}

/// A side controller that can act when it owns the next turn.
pub trait PlayerAgent {
    /// Called when `side` may be the next actor. Returns the action applied, if any.
    fn on_turn(
        &mut self,
        engine: &mut dyn RoundEngine,
        side: Side,
    ) -> Result<Option<Action>, RoundError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an action intent; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
    /// Drop anything queued for the previous round.
    fn reset(&mut self) {}
}

mod bots;

pub use bots::{BotAgent, BotProfile};

/// Executes user-intended actions when it's their turn.
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn reset(&mut self) {
        self.pending = None;
    }
    fn on_turn(
        &mut self,
        engine: &mut dyn RoundEngine,
        side: Side,
    ) -> Result<Option<Action>, RoundError> {
        if engine.is_terminal() {
            self.pending = None;
            return Ok(None);
        }
        if engine.next_side() != Some(side) {
            return Ok(None);
        }
        match self.pending.take() {
            Some(action) => {
                engine.apply_action(action)?;
                Ok(Some(action))
            }
            None => Ok(None),
        }
    }
}

/// One optional agent per side; drives the agent that owns the next turn.
pub struct AgentTable {
    seats: [Option<Box<dyn PlayerAgent>>; 2],
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |side: Side| match self.agent_kind(side) {
            Some(AgentKind::Human) => 'H',
            Some(AgentKind::Bot) => 'B',
            None => '-',
        };
        write!(f, "AgentTable({}{})", flag(Side::Human), flag(Side::Opponent))
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// Create a table with both sides empty.
    pub fn new() -> Self {
        Self { seats: [None, None], min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// The usual pairing: a human agent on the human side, `bot` on the opponent side.
    pub fn heads_up(bot: BotAgent) -> Self {
        let mut table = Self::new();
        table.set_agent(Side::Human, Some(Box::new(HumanAgent::new())));
        table.set_agent(Side::Opponent, Some(Box::new(bot)));
        table
    }

    /// Assign an agent to a side (or remove when `None`).
    pub fn set_agent(&mut self, side: Side, agent: Option<Box<dyn PlayerAgent>>) {
        self.seats[side.index()] = agent;
    }

    /// Get immutable access to an agent for inspection.
    pub fn agent(&self, side: Side) -> Option<&dyn PlayerAgent> {
        self.seats[side.index()].as_deref()
    }

    pub fn agent_kind(&self, side: Side) -> Option<AgentKind> {
        self.agent(side).map(|a| a.kind())
    }

    /// Send an action intent to a side's agent, if any.
    pub fn receive(&mut self, side: Side, action: Action) -> bool {
        match self.seats[side.index()].as_mut() {
            Some(agent) => agent.receive(action),
            None => false,
        }
    }

    /// Set a global minimum delay between bot actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the side that acts next, if any.
    pub fn on_turn(&mut self, engine: &mut dyn RoundEngine) -> Result<Option<Turn>, RoundError> {
        let Some(side) = engine.next_side() else {
            return Ok(None);
        };
        let Some(agent) = self.seats[side.index()].as_mut() else {
            return Ok(None);
        };
        let now = Instant::now();
        if matches!(agent.kind(), AgentKind::Bot) {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(None);
                }
            }
        }
        let acted = agent.on_turn(engine, side)?;
        if acted.is_some() && self.min_action_delay > Duration::ZERO {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted.map(|action| Turn { side, action }))
    }

    /// Forget queued intents and timers before a new round.
    pub fn reset(&mut self) {
        for agent in self.seats.iter_mut().flatten() {
            agent.reset();
        }
        self.next_action_at = None;
    }
}

use crate::engine::RoundEngine;
use crate::game::{Action, RoundError, Side};
use crate::policy::PolicyTable;
use crate::rng::{RandomSource, SeededRng, SystemRng};
use std::fmt;
use std::time::{Duration, Instant};

use super::{AgentKind, PlayerAgent};

/// Configuration for the automated opponent.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct BotProfile {
    pub table: PolicyTable,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Fixed think time before each action.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.min_delay_ms = delay_ms;
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn with_table(mut self, table: PolicyTable) -> Self {
        self.table = table;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self { table: PolicyTable::default(), min_delay_ms: 0, max_delay_ms: 0, rng_seed: None }
    }
}

/// Decision draws and think-delay draws come from separate sources.
struct BotState {
    rng: Box<dyn RandomSource>,
    delay_rng: Box<dyn RandomSource>,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => SeededRng::from_seed(v),
            None => SeededRng::from_entropy(),
        };
        Self::with_rng(Box::new(rng))
    }

    fn with_rng(rng: Box<dyn RandomSource>) -> Self {
        Self { rng, delay_rng: Box::new(SystemRng) }
    }
}

/// Plays the opponent side from a [`PolicyTable`], with an optional think delay.
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for BotAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotAgent")
            .field("profile", &self.profile)
            .field("next_action_at", &self.next_action_at)
            .finish_non_exhaustive()
    }
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }

    /// Use `rng` for decisions instead of the profile's seed.
    pub fn with_rng(profile: BotProfile, rng: Box<dyn RandomSource>) -> Self {
        Self { profile, state: BotState::with_rng(rng), next_action_at: None }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn reset(&mut self) {
        self.next_action_at = None;
    }
    fn on_turn(
        &mut self,
        engine: &mut dyn RoundEngine,
        side: Side,
    ) -> Result<Option<Action>, RoundError> {
        if engine.is_terminal() {
            return Ok(None);
        }
        if engine.next_side() != Some(side) {
            return Ok(None);
        }
        let now = Instant::now();
        match self.next_action_at {
            None => {
                let delay = choose_delay_ms(&self.profile, self.state.delay_rng.as_mut());
                if delay > 0 {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(None);
                }
            }
            Some(next) if now < next => {
                return Ok(None);
            }
            Some(_) => {}
        }
        self.next_action_at = None;

        let action = engine.play_opponent(&self.profile.table, self.state.rng.as_mut())?;
        Ok(Some(action))
    }
}

fn choose_delay_ms(profile: &BotProfile, rng: &mut dyn RandomSource) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        return min;
    }
    let span = (max - min + 1) as f64;
    (min + (rng.unit() * span) as u64).min(max)
}

// Round engine API boundary. Agents and hosts drive a round through this trait
// without touching `RoundState` internals. It is implemented for `RoundState`.

use crate::game::{Action, ActionError, Role, RoundError, RoundState, Side};
use crate::policy::PolicyTable;
use crate::rng::RandomSource;

pub trait RoundEngine {
    // Actions
    fn apply_action(&mut self, action: Action) -> Result<(), ActionError>;
    fn play_opponent(
        &mut self,
        table: &PolicyTable,
        rng: &mut dyn RandomSource,
    ) -> Result<Action, RoundError>;

    // Queries
    fn legal_actions(&self) -> &'static [Action];
    fn next_actor(&self) -> Option<Role>;
    fn next_side(&self) -> Option<Side>;
    fn is_terminal(&self) -> bool;
    fn pot(&self) -> u64;
    fn history(&self) -> &[Action];
    fn role_of(&self, side: Side) -> Role;
}

impl RoundEngine for RoundState {
    fn apply_action(&mut self, action: Action) -> Result<(), ActionError> {
        self.apply_action(action)
    }
    fn play_opponent(
        &mut self,
        table: &PolicyTable,
        rng: &mut dyn RandomSource,
    ) -> Result<Action, RoundError> {
        self.play_opponent(table, rng)
    }

    fn legal_actions(&self) -> &'static [Action] {
        self.legal_actions()
    }
    fn next_actor(&self) -> Option<Role> {
        self.next_actor()
    }
    fn next_side(&self) -> Option<Side> {
        self.next_side()
    }
    fn is_terminal(&self) -> bool {
        self.is_terminal()
    }
    fn pot(&self) -> u64 {
        self.pot()
    }
    fn history(&self) -> &[Action] {
        self.history()
    }
    fn role_of(&self, side: Side) -> Role {
        self.role_of(side)
    }
}

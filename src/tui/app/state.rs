use crate::agents::{BotAgent, BotProfile};
use crate::game::{Action, CoinFace, Side};
use crate::rng::{SeededRng, SystemRng};
use crate::session::{Session, TossReport};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Toss,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    CallHeads,
    CallTails,
    Act(Action),
    NewRound,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub session: Session,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_bot_delay_ms: u64,
    pub cfg_seed: Option<u64>,
    pub bot_delay_ms: u64,
    pub seed: Option<u64>,
    pub toss_report: Option<TossReport>,
    pub last_opponent_move: Option<Action>,
    help_open: bool,
    history_open: bool,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None, 500)
    }
}

impl AppState {
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Start at the menu with a session built from `seed` and `bot_delay_ms`.
    pub fn new(seed: Option<u64>, bot_delay_ms: u64) -> Self {
        let mut app = Self::with_session(build_session(seed, bot_delay_ms));
        app.seed = seed;
        app.cfg_seed = seed;
        app.bot_delay_ms = bot_delay_ms;
        app.cfg_bot_delay_ms = bot_delay_ms;
        app.scene = Scene::Menu;
        app
    }

    /// Skip the menu and go straight to the coin toss with a prepared session.
    pub fn with_session(session: Session) -> Self {
        Self {
            scene: Scene::Toss,
            started: Instant::now(),
            session,
            menu_index: 0,
            cfg_bot_delay_ms: 0,
            cfg_seed: None,
            bot_delay_ms: 0,
            seed: None,
            toss_report: None,
            last_opponent_move: None,
            help_open: false,
            history_open: false,
            action_error: None,
            action_error_at: None,
        }
    }

    pub(crate) fn rebuild_session(&mut self) {
        self.session = build_session(self.seed, self.bot_delay_ms);
        self.toss_report = None;
        self.last_opponent_move = None;
        self.clear_action_error();
    }

    /// Scene to fall back to when leaving the menu.
    pub(crate) fn play_scene(&self) -> Scene {
        if self.session.round().is_some() {
            Scene::Table
        } else {
            Scene::Toss
        }
    }

    /// Whether the human owns the next turn of a live round.
    pub fn human_to_act(&self) -> bool {
        self.scene == Scene::Table
            && self.session.round().is_some_and(|r| r.next_side() == Some(Side::Human))
    }

    fn queue_action(&mut self, action: Action) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        match self.session.submit(action) {
            Ok(()) => {
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn call_toss(&mut self, call: CoinFace) -> bool {
        if self.scene != Scene::Toss {
            return false;
        }
        match self.session.toss(call) {
            Ok(report) => {
                self.toss_report = Some(report);
                self.last_opponent_move = None;
                self.clear_action_error();
                self.scene = Scene::Table;
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    /// Returns true when the input queued a human action that the caller should drive.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene != Scene::Menu {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::CallHeads => {
                self.call_toss(CoinFace::Heads);
                false
            }
            InputAction::CallTails => {
                self.call_toss(CoinFace::Tails);
                false
            }
            InputAction::Act(action) => self.queue_action(action),
            InputAction::NewRound => {
                if self.scene == Scene::Table {
                    self.new_round();
                }
                false
            }
        }
    }

    /// Back to the coin toss once the current round is over.
    pub fn new_round(&mut self) {
        if self.session.in_progress() {
            return;
        }
        self.session.reset();
        self.toss_report = None;
        self.last_opponent_move = None;
        self.history_open = false;
        self.clear_action_error();
        self.scene = Scene::Toss;
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.session.tick() {
            Ok(Some(turn)) => {
                self.last_opponent_move = match turn.side {
                    Side::Opponent => Some(turn.action),
                    Side::Human => None,
                };
                self.clear_action_error();
            }
            Ok(None) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}

fn build_session(seed: Option<u64>, bot_delay_ms: u64) -> Session {
    let profile = BotProfile::default().with_delay_ms(bot_delay_ms);
    match seed {
        Some(s) => Session::new(
            Box::new(SeededRng::from_seed(s)),
            BotAgent::new(profile.with_seed(s.wrapping_add(1))),
        ),
        None => Session::new(Box::new(SystemRng), BotAgent::new(profile)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn scripted_app(draw: f64) -> AppState {
        let session = Session::builder()
            .source(Box::new(ScriptedRng::constant(draw)))
            .bot_rng(Box::new(ScriptedRng::constant(0.99)))
            .build()
            .unwrap();
        AppState::with_session(session)
    }

    #[test]
    fn action_ignored_before_toss() {
        let mut app = scripted_app(0.1);
        assert!(!app.handle_input(InputAction::Act(Action::Bet)));
        assert!(app.session.round().is_none());
    }

    #[test]
    fn action_rejected_when_not_legal() {
        let mut app = scripted_app(0.1);
        let _ = app.handle_input(InputAction::CallHeads);
        assert_eq!(app.scene, Scene::Table);
        assert!(!app.handle_input(InputAction::Act(Action::Call)));
        assert!(app.action_error().is_some());
        assert!(app.session.round().unwrap().history().is_empty());
    }

    #[test]
    fn new_round_waits_for_round_end() {
        let mut app = scripted_app(0.1);
        let _ = app.handle_input(InputAction::CallHeads);
        let _ = app.handle_input(InputAction::NewRound);
        assert_eq!(app.scene, Scene::Table, "round still running");

        // Ace bets, the Queen facing a bet always folds
        assert!(app.handle_input(InputAction::Act(Action::Bet)));
        app.agents_on_turn();
        app.agents_on_turn();
        assert_eq!(app.last_opponent_move, Some(Action::Fold));
        assert!(!app.session.in_progress());

        let _ = app.handle_input(InputAction::NewRound);
        assert_eq!(app.scene, Scene::Toss);
        assert!(app.toss_report.is_none());
    }
}

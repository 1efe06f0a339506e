use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    BotDelayMs,
    Seed,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::BotDelayMs, MenuItem::Seed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::BotDelayMs => format!("Computer Delay (ms): {}", app.cfg_bot_delay_ms),
            MenuItem::Seed => match app.cfg_seed {
                Some(seed) => format!("Seed: {seed}"),
                None => "Seed: random".to_string(),
            },
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
            MenuItem::Seed => {
                app.cfg_seed = Some(app.cfg_seed.map_or(0, |s| s.saturating_add(1)));
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
            // stepping below zero goes back to entropy
            MenuItem::Seed => {
                app.cfg_seed = match app.cfg_seed {
                    Some(0) | None => None,
                    Some(s) => Some(s - 1),
                };
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu => self.play_scene(),
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_seed = self.seed;
        self.scene = Scene::Menu;
    }

    /// Apply the edited settings. Any round in play is abandoned.
    pub fn apply_menu(&mut self) {
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.seed = self.cfg_seed;
        log::info!("settings applied: delay {}ms, seed {:?}", self.bot_delay_ms, self.seed);
        self.rebuild_session();
        self.scene = Scene::Toss;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = self.play_scene();
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}

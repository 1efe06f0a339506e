use crate::game::Action;
use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input for the current scene. Returns true to quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        if matches!(code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
            let _ = app.handle_input(InputAction::ToggleHistory);
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Toss => match code {
            KeyCode::Char('h') | KeyCode::Char('H') => {
                let _ = app.handle_input(InputAction::CallHeads);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                let _ = app.handle_input(InputAction::CallTails);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            _ => {}
        },
        Scene::Table => {
            let act = match code {
                KeyCode::Char('k' | 'K' | 'x' | 'X') => Some(Action::Check),
                KeyCode::Char('b') | KeyCode::Char('B') => Some(Action::Bet),
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Call),
                KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::Fold),
                _ => None,
            };
            if let Some(action) = act {
                if app.handle_input(InputAction::Act(action)) {
                    app.agents_on_turn();
                }
                return false;
            }
            match code {
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    let _ = app.handle_input(InputAction::ToggleMenu);
                }
                KeyCode::Char('h') | KeyCode::Char('H') => {
                    let _ = app.handle_input(InputAction::ToggleHistory);
                }
                KeyCode::Char(' ') => {
                    let _ = app.handle_input(InputAction::NewRound);
                }
                _ => {}
            }
        }
    }
    false
}

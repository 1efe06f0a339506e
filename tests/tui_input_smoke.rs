use akq_rs::game::Action;
use akq_rs::rng::ScriptedRng;
use akq_rs::session::Session;
use akq_rs::tui::app::{AppState, InputAction, Scene};
use akq_rs::tui::controller::handle_key;
use crossterm::event::KeyCode;

// Dealer draws of 0.1 land heads and give the human the Ace against the Queen.
fn setup_toss_app() -> AppState {
    let session = Session::builder()
        .source(Box::new(ScriptedRng::constant(0.1)))
        .bot_rng(Box::new(ScriptedRng::constant(0.99)))
        .build()
        .unwrap();
    AppState::with_session(session)
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::new(Some(3), 0);
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuInc);
    assert_eq!(app.cfg_seed, Some(4));
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Toss));
    assert_eq!(app.seed, Some(4));
}

#[test]
fn seed_steps_down_to_random() {
    let mut app = AppState::new(Some(0), 0);
    let _ = app.handle_input(InputAction::MenuNext);
    let _ = app.handle_input(InputAction::MenuDec);
    assert_eq!(app.cfg_seed, None);
    assert!(app.menu_items_display()[1].contains("random"));
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_toss_app();
    let _ = app.handle_input(InputAction::CallHeads);
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn keys_play_a_round() {
    let mut app = setup_toss_app();
    assert!(!handle_key(&mut app, KeyCode::Char('h')));
    assert!(matches!(app.scene, Scene::Table));
    assert!(app.human_to_act());

    // b bets and drives the human turn; the next tick lets the Queen fold
    let _ = handle_key(&mut app, KeyCode::Char('b'));
    app.agents_on_turn();
    assert_eq!(app.last_opponent_move, Some(Action::Fold));
    assert!(!app.session.in_progress());

    let _ = handle_key(&mut app, KeyCode::Char(' '));
    assert!(matches!(app.scene, Scene::Toss));
}

#[test]
fn quit_only_from_menu() {
    let mut app = setup_toss_app();
    assert!(!handle_key(&mut app, KeyCode::Char('q')));
    let _ = handle_key(&mut app, KeyCode::Char('m'));
    assert!(matches!(app.scene, Scene::Menu));
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}

#[test]
fn menu_cancel_returns_to_the_table() {
    let mut app = setup_toss_app();
    let _ = app.handle_input(InputAction::CallTails);
    let _ = app.handle_input(InputAction::ToggleMenu);
    let _ = app.handle_input(InputAction::MenuCancel);
    assert!(matches!(app.scene, Scene::Table));
    assert!(app.session.round().is_some());
}

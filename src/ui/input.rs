//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry for the screen on top
//! of the navigation stack, then dispatched to that screen's handler.

use crate::app::{App, AppEvent};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::nav::NavState;
use crate::store::Flag;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::open_selected;

/// Main input dispatch function.
///
/// Toggle actions await the server inline, so the next key is only handled
/// once the previous action completed.
pub async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match app.nav.state() {
        NavState::ListFocused => handle_list_input(app, code, modifiers, event_tx).await,
        NavState::DetailFocused => handle_detail_input(app, code, modifiers),
        NavState::Terminated => {}
    }
}

async fn handle_list_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::List);

    match action {
        Some(KbAction::Quit) => app.nav.quit(),
        Some(KbAction::NavDown) => {
            let len = app.store.len();
            app.nav.list_mut().move_down(len);
        }
        Some(KbAction::NavUp) => app.nav.list_mut().move_up(),
        Some(KbAction::Open) => {
            open_selected(app, event_tx);
        }
        Some(KbAction::ToggleRead) => app.toggle_selected(Flag::Read).await,
        Some(KbAction::ToggleStar) => app.toggle_selected(Flag::Starred).await,
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Detail);

    if action == Some(KbAction::Back) {
        app.close_detail();
        return;
    }
    if action == Some(KbAction::Quit) {
        app.nav.quit();
        return;
    }

    let Some(detail) = app.nav.detail_mut() else {
        return;
    };
    match action {
        Some(KbAction::ScrollDown) => detail.scroll_down(1),
        Some(KbAction::ScrollUp) => detail.scroll_up(1),
        Some(KbAction::PageDown) => detail.page_down(),
        Some(KbAction::PageUp) => detail.page_up(),
        Some(KbAction::ScrollHome) => detail.scroll_home(),
        Some(KbAction::ScrollEnd) => detail.scroll_end(),
        _ => {}
    }
}

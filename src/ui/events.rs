//! Application event handling.
//!
//! Applies background task results to the store and screens. This is the
//! only place, besides the toggle action, that writes into the store.

use crate::app::{App, AppEvent, LoadedItem};
use crate::store::{Flag, ItemId};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::helpers::spawn_mark_read;

/// Handle an event sent by a background task.
///
/// # Arguments
///
/// * `app` - Mutable application state
/// * `event` - Result from a background task
/// * `event_tx` - Sender for follow-up tasks (mark-as-read after a load)
pub fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::ItemLoaded {
            id,
            generation,
            result,
        } => {
            handle_item_loaded(app, id, generation, result, event_tx);
        }
        AppEvent::MarkedRead { id } => {
            if app.store.commit(id, Flag::Read, true) {
                tracing::debug!(item_id = %id, "Marked as read on open");
            } else {
                tracing::debug!(item_id = %id, "Mark as read confirmed for unknown item");
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

fn handle_item_loaded(
    app: &mut App,
    id: ItemId,
    generation: u64,
    result: Result<LoadedItem, String>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    // Generation first: a fast back-and-open on the same item must not pick
    // up the earlier load.
    if generation != app.detail_load_generation {
        tracing::debug!(
            expected = app.detail_load_generation,
            got = generation,
            item_id = %id,
            "Ignoring stale detail load (generation mismatch)"
        );
        return;
    }

    let Some(detail) = app
        .nav
        .detail_mut()
        .filter(|d| d.item_id() == id && d.generation() == generation)
    else {
        tracing::debug!(item_id = %id, "Detail closed before load finished");
        return;
    };
    app.detail_load_handle = None;

    match result {
        Ok(loaded) => {
            detail.set_loaded(&loaded.text);
            if !loaded.read {
                spawn_mark_read(id, Arc::clone(&app.gateway), event_tx.clone());
            }
        }
        Err(error) => detail.set_failed(error),
    }
}

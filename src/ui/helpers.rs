//! Background task plumbing shared by the input and event handlers.

use crate::api::Gateway;
use crate::app::{App, AppEvent, LoadedItem};
use crate::content::Renderer;
use crate::screen::DetailScreen;
use crate::store::{Flag, ItemId};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of a spawned task silently disappearing, the panic payload is
/// turned into `Err(String)` so it can be reported as
/// [`AppEvent::TaskPanicked`].
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

async fn send(tx: &mpsc::Sender<AppEvent>, event: AppEvent) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, "Channel send failed (receiver dropped)");
    }
}

/// Push a detail view for the item under the list cursor and start loading
/// it.
///
/// - Bumps `detail_load_generation` so results of older loads are dropped
/// - Aborts the previous load handle, if any
/// - Renders at [`App::detail_width`]
///
/// # Arguments
///
/// * `app` - Mutable application state
/// * `event_tx` - Channel the load reports back on
///
/// # Returns
///
/// `true` if a detail view was pushed, `false` on an empty list or when the
/// list is not on top.
pub(super) fn open_selected(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) -> bool {
    let Some(item) = app.nav.list().selected(&app.store) else {
        tracing::debug!("Open on empty list ignored");
        return false;
    };
    let id = item.id;

    app.detail_load_generation = app.detail_load_generation.wrapping_add(1);
    let generation = app.detail_load_generation;
    if !app.nav.push_detail(DetailScreen::new(id, generation)) {
        return false;
    }

    if let Some(handle) = app.detail_load_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous detail load");
    }

    tracing::debug!(item_id = %id, generation, "Starting detail load");
    app.detail_load_handle = Some(spawn_detail_load(
        id,
        generation,
        app.detail_width(),
        Arc::clone(&app.gateway),
        Arc::clone(&app.renderer),
        event_tx.clone(),
    ));
    true
}

/// Spawn a task that fetches the full item and renders it at `width`.
///
/// Sends `AppEvent::ItemLoaded` on completion, success or failure. Fetch and
/// render errors travel as their display text. A panic in either step is
/// reported as `AppEvent::TaskPanicked` instead.
///
/// # Arguments
///
/// * `id` - Item to load
/// * `generation` - Load generation echoed back in the event
/// * `width` - Column width the body is wrapped at
/// * `gateway` - Remote gateway for `get_item`
/// * `renderer` - Turns the fetched record into text
/// * `tx` - Channel to send the result on
pub(super) fn spawn_detail_load(
    id: ItemId,
    generation: u64,
    width: usize,
    gateway: Arc<dyn Gateway>,
    renderer: Arc<dyn Renderer>,
    tx: mpsc::Sender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let load = async {
            let detail = gateway.get_item(id).await.map_err(|e| e.to_string())?;
            let text = renderer
                .render(&detail, width)
                .map_err(|e| e.to_string())?;
            Ok::<_, String>(LoadedItem {
                read: detail.item.read,
                text,
            })
        };

        match catch_task_panic(load).await {
            Ok(result) => {
                if let Err(error) = &result {
                    tracing::warn!(item_id = %id, error = %error, "Detail load failed");
                }
                send(
                    &tx,
                    AppEvent::ItemLoaded {
                        id,
                        generation,
                        result,
                    },
                )
                .await;
            }
            Err(panic_msg) => {
                tracing::error!(item_id = %id, error = %panic_msg, "Detail load panicked");
                send(
                    &tx,
                    AppEvent::TaskPanicked {
                        task: "detail_load",
                        error: panic_msg,
                    },
                )
                .await;
            }
        }
    })
}

/// Fire-and-forget `read = true` update for an opened item.
///
/// The store is only written once the server confirmed, through
/// `AppEvent::MarkedRead`. A failed update is dropped without a status
/// message: the item simply stays unread.
pub(super) fn spawn_mark_read(
    id: ItemId,
    gateway: Arc<dyn Gateway>,
    tx: mpsc::Sender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let update = async { gateway.update_item(id, &Flag::Read.patch(true)).await };
        match catch_task_panic(update).await {
            Ok(Ok(())) => send(&tx, AppEvent::MarkedRead { id }).await,
            Ok(Err(e)) => {
                tracing::debug!(item_id = %id, error = %e, "Mark as read failed, ignoring");
            }
            Err(panic_msg) => {
                tracing::error!(item_id = %id, error = %panic_msg, "Mark as read panicked");
                send(
                    &tx,
                    AppEvent::TaskPanicked {
                        task: "mark_read",
                        error: panic_msg,
                    },
                )
                .await;
            }
        }
    })
}

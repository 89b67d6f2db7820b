//! Central application state shared by the event loop, input handlers and
//! renderers.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::api::Gateway;
use crate::content::{Renderer, MIN_RENDER_WIDTH};
use crate::keybindings::KeybindingRegistry;
use crate::nav::{NavState, Navigator};
use crate::screen::ListScreen;
use crate::store::{toggle, Flag, ItemId, ItemStore};

// ============================================================================
// Background Events
// ============================================================================

/// Rendered article body plus the read flag the server reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedItem {
    pub read: bool,
    pub text: String,
}

/// Results of background tasks, applied on the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A detail load finished.
    ///
    /// `generation` is the value of `App::detail_load_generation` when the
    /// load was spawned. `result` holds the fetch or render error text.
    ItemLoaded {
        id: ItemId,
        generation: u64,
        result: Result<LoadedItem, String>,
    },
    /// The server accepted a mark-as-read sent when a detail was opened.
    MarkedRead { id: ItemId },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    /// Single owner of item data. Screens refer into it by position or id.
    pub store: ItemStore,
    pub nav: Navigator,
    pub gateway: Arc<dyn Gateway>,
    pub renderer: Arc<dyn Renderer>,
    pub keybindings: KeybindingRegistry,

    /// Configured wrap width for article bodies.
    pub content_width: usize,

    /// Inner width of the detail view at the last draw. `None` before the
    /// first draw.
    pub viewport_width: Option<usize>,

    /// Skip frame renders when nothing changed.
    pub needs_redraw: bool,

    /// Incremented each time a detail load is spawned. Loads that finish
    /// with an older generation are dropped.
    pub detail_load_generation: u64,

    /// Handle to the in-flight detail load, aborted when the detail closes.
    pub detail_load_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        store: ItemStore,
        gateway: Arc<dyn Gateway>,
        renderer: Arc<dyn Renderer>,
        content_width: usize,
    ) -> Self {
        Self {
            store,
            nav: Navigator::new(ListScreen::new()),
            gateway,
            renderer,
            keybindings: KeybindingRegistry::new(),
            content_width,
            viewport_width: None,
            needs_redraw: true,
            detail_load_generation: 0,
            detail_load_handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.nav.state() != NavState::Terminated
    }

    /// Width detail bodies are rendered at: the configured width, capped by
    /// the terminal once it is known.
    pub fn detail_width(&self) -> usize {
        let width = match self.viewport_width {
            Some(viewport) => self.content_width.min(viewport),
            None => self.content_width,
        };
        width.max(MIN_RENDER_WIDTH)
    }

    /// Toggle `flag` on the item under the list cursor and report the
    /// outcome on the list's status line.
    pub async fn toggle_selected(&mut self, flag: Flag) {
        let position = self.nav.list().cursor();
        let outcome = toggle(&mut self.store, self.gateway.as_ref(), position, flag).await;
        self.nav.list_mut().report(flag, &outcome);
    }

    /// Show a transient message on whichever screen is on top.
    pub fn set_status(&mut self, message: impl Into<String>) {
        match self.nav.detail_mut() {
            Some(detail) => detail.status.show(message),
            None => self.nav.list_mut().status.show(message),
        };
    }

    /// Revert status messages whose delay has passed. Returns `true` if
    /// anything changed on screen.
    pub fn clear_expired_status(&mut self) -> bool {
        let now = Instant::now();
        let mut changed = self.nav.list_mut().status.expire(now);
        if let Some(detail) = self.nav.detail_mut() {
            changed |= detail.status.expire(now);
        }
        changed
    }

    /// Pop the detail view, cancelling its load.
    pub fn close_detail(&mut self) -> bool {
        if let Some(handle) = self.detail_load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted detail load on close");
        }
        self.nav.pop()
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.detail_load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted detail load on App drop");
        }
    }
}

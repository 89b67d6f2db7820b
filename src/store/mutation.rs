//! Request-first flag toggling.
//!
//! A toggle asks the server first and only writes into the [`ItemStore`]
//! once the server confirmed the new value. There is no local flip before
//! confirmation, so nothing ever needs rolling back: the displayed flag is
//! always a value the server holds. The cost is one round trip of input
//! latency per toggle.

use crate::api::{ApiError, Gateway};

use super::items::ItemStore;
use super::types::{Flag, ItemId};

/// Outcome of a toggle action.
#[derive(Debug)]
pub enum Toggle {
    /// The server accepted `value` and the store now holds it.
    Committed { id: ItemId, value: bool },
    /// The server rejected the update; the store is unchanged.
    Rejected { id: ItemId, error: ApiError },
    /// The position no longer addresses an item. Nothing was sent.
    Stale,
}

/// Toggle `flag` on the item at `position`.
///
/// Awaits the remote update before touching the store. Failures are returned,
/// never retried.
///
/// # Arguments
///
/// * `store` - Item store, written only on success
/// * `gateway` - Remote gateway the update is sent through
/// * `position` - Display position of the item
/// * `flag` - Which flag to flip
///
/// # Returns
///
/// [`Toggle::Committed`] with the new value, [`Toggle::Rejected`] with the
/// server's error, or [`Toggle::Stale`] if `position` is out of range.
pub async fn toggle(
    store: &mut ItemStore,
    gateway: &dyn Gateway,
    position: usize,
    flag: Flag,
) -> Toggle {
    let Some(item) = store.get(position) else {
        tracing::debug!(position, len = store.len(), ?flag, "Toggle on stale position ignored");
        return Toggle::Stale;
    };
    let id = item.id;
    let value = !flag.value(item);

    tracing::debug!(item_id = %id, ?flag, value, "Sending flag update");
    match gateway.update_item(id, &flag.patch(value)).await {
        Ok(()) => {
            store.commit(id, flag, value);
            tracing::info!(item_id = %id, ?flag, value, "Flag update confirmed");
            Toggle::Committed { id, value }
        }
        Err(error) => {
            tracing::warn!(item_id = %id, ?flag, error = %error, "Flag update failed");
            Toggle::Rejected { id, error }
        }
    }
}

//! Remote gateway to the read-it-later server.
//!
//! The UI only talks to the [`Gateway`] trait. [`WallabagClient`] is the
//! production implementation over the Wallabag REST API; [`MockGateway`]
//! keeps items in memory and records calls for tests.

mod client;
mod mock;
mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::store::{Item, ItemDetail, ItemId, ItemUpdate};

pub use client::WallabagClient;
pub use mock::{MockCall, MockGateway};

/// Default number of items requested by the bulk list fetch.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Errors from remote calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the client timeout
    #[error("Request timed out")]
    Timeout,
    /// Non-2xx response
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Token request rejected by the server
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Filters for the bulk list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    /// `Some(true)` only read items, `Some(false)` only unread.
    pub read: Option<bool>,
    pub starred: Option<bool>,
    pub tags: Vec<String>,
    pub oldest_first: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            read: None,
            starred: None,
            tags: Vec::new(),
            oldest_first: false,
        }
    }
}

/// Remote item operations. Every call may fail; none is retried by callers.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Ordered item list, server order preserved.
    async fn list_items(&self, query: &ListQuery) -> Result<Vec<Item>, ApiError>;

    /// Full record of a single item, including its body.
    async fn get_item(&self, id: ItemId) -> Result<ItemDetail, ApiError>;

    /// Apply a flag patch remotely.
    async fn update_item(&self, id: ItemId, update: &ItemUpdate) -> Result<(), ApiError>;
}

//! In-memory gateway for tests.
//!
//! Records every call and lets tests inject failures per operation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiError, Gateway, ListQuery};
use crate::store::{Item, ItemDetail, ItemId, ItemUpdate};

/// A recorded call to the mock gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    List(ListQuery),
    Get(ItemId),
    Update(ItemId, ItemUpdate),
}

type ErrorFactory = Box<dyn Fn() -> ApiError + Send + Sync>;

/// Mock implementation of [`Gateway`].
///
/// Successful updates are applied to the mock's own copy of the items so
/// that later `get_item` calls observe them, like a real server would.
#[derive(Default)]
pub struct MockGateway {
    items: Mutex<Vec<Item>>,
    bodies: Mutex<HashMap<ItemId, String>>,
    calls: Mutex<Vec<MockCall>>,
    list_error: Mutex<Option<ErrorFactory>>,
    get_error: Mutex<Option<ErrorFactory>>,
    update_error: Mutex<Option<ErrorFactory>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the server-side items, in list order.
    pub fn with_items(self, items: Vec<Item>) -> Self {
        *lock(&self.items) = items;
        self
    }

    /// Set the HTML body returned by `get_item` for `id`.
    pub fn with_body(self, id: ItemId, body: &str) -> Self {
        lock(&self.bodies).insert(id, body.to_string());
        self
    }

    /// Make every subsequent `list_items` fail.
    pub fn fail_list(&self, make: impl Fn() -> ApiError + Send + Sync + 'static) {
        *lock(&self.list_error) = Some(Box::new(make));
    }

    /// Make every subsequent `get_item` fail.
    pub fn fail_gets(&self, make: impl Fn() -> ApiError + Send + Sync + 'static) {
        *lock(&self.get_error) = Some(Box::new(make));
    }

    /// Make every subsequent `update_item` fail.
    pub fn fail_updates(&self, make: impl Fn() -> ApiError + Send + Sync + 'static) {
        *lock(&self.update_error) = Some(Box::new(make));
    }

    /// Let updates succeed again.
    pub fn recover_updates(&self) {
        *lock(&self.update_error) = None;
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Recorded update calls only.
    pub fn updates(&self) -> Vec<(ItemId, ItemUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Update(id, update) => Some((id, update)),
                _ => None,
            })
            .collect()
    }

    /// Server-side copy of an item.
    pub fn item(&self, id: ItemId) -> Option<Item> {
        lock(&self.items).iter().find(|i| i.id == id).cloned()
    }

    fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
    }

    fn injected(slot: &Mutex<Option<ErrorFactory>>) -> Option<ApiError> {
        lock(slot).as_ref().map(|make| make())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_items(&self, query: &ListQuery) -> Result<Vec<Item>, ApiError> {
        self.record(MockCall::List(query.clone()));
        if let Some(err) = Self::injected(&self.list_error) {
            return Err(err);
        }
        let items = lock(&self.items);
        Ok(items
            .iter()
            .filter(|i| query.read.is_none_or(|r| i.read == r))
            .filter(|i| query.starred.is_none_or(|s| i.starred == s))
            .filter(|i| query.tags.iter().all(|t| i.tags.contains(t)))
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn get_item(&self, id: ItemId) -> Result<ItemDetail, ApiError> {
        self.record(MockCall::Get(id));
        if let Some(err) = Self::injected(&self.get_error) {
            return Err(err);
        }
        let item = self.item(id).ok_or(ApiError::HttpStatus(404))?;
        let content = lock(&self.bodies).get(&id).cloned().unwrap_or_default();
        Ok(ItemDetail {
            item,
            content,
            domain_name: None,
        })
    }

    async fn update_item(&self, id: ItemId, update: &ItemUpdate) -> Result<(), ApiError> {
        self.record(MockCall::Update(id, *update));
        if let Some(err) = Self::injected(&self.update_error) {
            return Err(err);
        }
        let mut items = lock(&self.items);
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            if let Some(read) = update.read {
                item.read = read;
            }
            if let Some(starred) = update.starred {
                item.starred = starred;
            }
        }
        Ok(())
    }
}

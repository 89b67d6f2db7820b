//! Screen stack: the list at the bottom, at most one detail view on top.

use crate::screen::{DetailScreen, ListScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    ListFocused,
    DetailFocused,
    Terminated,
}

/// Navigation stack.
///
/// The list frame can never be popped and a detail frame can only sit
/// directly on the list, so the stack is a list plus an optional detail.
#[derive(Debug)]
pub struct Navigator {
    list: ListScreen,
    detail: Option<DetailScreen>,
    terminated: bool,
}

impl Navigator {
    pub fn new(list: ListScreen) -> Self {
        Self {
            list,
            detail: None,
            terminated: false,
        }
    }

    pub fn state(&self) -> NavState {
        if self.terminated {
            NavState::Terminated
        } else if self.detail.is_some() {
            NavState::DetailFocused
        } else {
            NavState::ListFocused
        }
    }

    /// Push a detail view over the list. Ignored unless the list is on top.
    pub fn push_detail(&mut self, detail: DetailScreen) -> bool {
        if self.state() != NavState::ListFocused {
            tracing::debug!(state = ?self.state(), item_id = %detail.item_id(), "Ignoring detail push");
            return false;
        }
        self.detail = Some(detail);
        true
    }

    /// Pop the top frame. The list itself is never popped.
    pub fn pop(&mut self) -> bool {
        self.detail.take().is_some()
    }

    pub fn quit(&mut self) {
        self.terminated = true;
    }

    pub fn depth(&self) -> usize {
        1 + usize::from(self.detail.is_some())
    }

    pub fn list(&self) -> &ListScreen {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListScreen {
        &mut self.list
    }

    pub fn detail(&self) -> Option<&DetailScreen> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailScreen> {
        self.detail.as_mut()
    }
}

//! Keybinding registry: maps key events to actions per screen context.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    Open,
    ToggleRead,
    ToggleStar,
    Back,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ScrollHome,
    ScrollEnd,
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context. `Global` bindings apply on every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    List,
    Detail,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Fixed keybindings, looked up by (context, key).
///
/// The same key can map to different actions in different contexts: `q`
/// quits from the list but goes back from the detail view.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, keys: &[KeySpec], action: Action) {
        for key in keys {
            self.lookup.insert((context, *key), action);
        }
    }

    fn register_defaults(&mut self) {
        use KeyCode::{Char, Down, End, Enter, Esc, Home, PageDown, PageUp, Up};
        let plain = KeySpec::plain;

        // === Everywhere ===
        self.bind(Context::Global, &[KeySpec::ctrl('c')], Action::Quit);

        // === List ===
        self.bind(Context::List, &[plain(Char('q'))], Action::Quit);
        self.bind(Context::List, &[plain(Char('j')), plain(Down)], Action::NavDown);
        self.bind(Context::List, &[plain(Char('k')), plain(Up)], Action::NavUp);
        self.bind(Context::List, &[plain(Enter), plain(Char('o'))], Action::Open);
        self.bind(Context::List, &[plain(Char('r'))], Action::ToggleRead);
        self.bind(Context::List, &[plain(Char('s'))], Action::ToggleStar);

        // === Detail ===
        self.bind(Context::Detail, &[plain(Char('q')), plain(Esc)], Action::Back);
        self.bind(Context::Detail, &[plain(Char('j')), plain(Down)], Action::ScrollDown);
        self.bind(Context::Detail, &[plain(Char('k')), plain(Up)], Action::ScrollUp);
        self.bind(Context::Detail, &[plain(PageDown)], Action::PageDown);
        self.bind(Context::Detail, &[plain(PageUp)], Action::PageUp);
        self.bind(Context::Detail, &[plain(Home)], Action::ScrollHome);
        self.bind(Context::Detail, &[plain(End)], Action::ScrollEnd);
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        self.lookup
            .get(&(context, key))
            .or_else(|| self.lookup.get(&(Context::Global, key)))
            .copied()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(reg: &KeybindingRegistry, code: KeyCode, context: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, context)
    }

    #[test]
    fn test_list_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(plain(&reg, KeyCode::Char('j'), Context::List), Some(Action::NavDown));
        assert_eq!(plain(&reg, KeyCode::Down, Context::List), Some(Action::NavDown));
        assert_eq!(plain(&reg, KeyCode::Char('k'), Context::List), Some(Action::NavUp));
        assert_eq!(plain(&reg, KeyCode::Up, Context::List), Some(Action::NavUp));
        assert_eq!(plain(&reg, KeyCode::Enter, Context::List), Some(Action::Open));
        assert_eq!(plain(&reg, KeyCode::Char('o'), Context::List), Some(Action::Open));
        assert_eq!(plain(&reg, KeyCode::Char('r'), Context::List), Some(Action::ToggleRead));
        assert_eq!(plain(&reg, KeyCode::Char('s'), Context::List), Some(Action::ToggleStar));
        assert_eq!(plain(&reg, KeyCode::Char('q'), Context::List), Some(Action::Quit));
    }

    #[test]
    fn test_detail_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(plain(&reg, KeyCode::Char('q'), Context::Detail), Some(Action::Back));
        assert_eq!(plain(&reg, KeyCode::Esc, Context::Detail), Some(Action::Back));
        assert_eq!(plain(&reg, KeyCode::Char('j'), Context::Detail), Some(Action::ScrollDown));
        assert_eq!(plain(&reg, KeyCode::Up, Context::Detail), Some(Action::ScrollUp));
        assert_eq!(plain(&reg, KeyCode::PageDown, Context::Detail), Some(Action::PageDown));
        assert_eq!(plain(&reg, KeyCode::PageUp, Context::Detail), Some(Action::PageUp));
        assert_eq!(plain(&reg, KeyCode::Home, Context::Detail), Some(Action::ScrollHome));
        assert_eq!(plain(&reg, KeyCode::End, Context::Detail), Some(Action::ScrollEnd));
    }

    #[test]
    fn test_list_actions_not_bound_in_detail() {
        let reg = KeybindingRegistry::new();
        assert_eq!(plain(&reg, KeyCode::Char('r'), Context::Detail), None);
        assert_eq!(plain(&reg, KeyCode::Char('s'), Context::Detail), None);
        assert_eq!(plain(&reg, KeyCode::Enter, Context::Detail), None);
        assert_eq!(plain(&reg, KeyCode::Esc, Context::List), None);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let reg = KeybindingRegistry::new();
        for context in [Context::List, Context::Detail] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, context),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_modifiers_must_match() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('j'), KeyModifiers::CONTROL, Context::List),
            None
        );
        assert_eq!(plain(&reg, KeyCode::F(12), Context::List), None);
    }
}

//! Key binding registry: raw keys to bound key functions.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to
//! [`BoundKeyFunction`]s. The `with_defaults()` constructor installs the
//! text-editing bindings focused controls expect (Enter -> TextSubmit, etc.).

use std::collections::HashMap;

use super::input::{BoundKeyFunction, Key, KeyEvent, Modifiers};

/// Registry of key bindings, mapping (Key, Modifiers) -> BoundKeyFunction.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BoundKeyFunction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with the standard text-editing bindings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (key, function) in [
            (Key::Enter, BoundKeyFunction::TEXT_SUBMIT),
            (Key::Backspace, BoundKeyFunction::TEXT_BACKSPACE),
            (Key::Delete, BoundKeyFunction::TEXT_DELETE),
            (Key::Left, BoundKeyFunction::TEXT_CURSOR_LEFT),
            (Key::Right, BoundKeyFunction::TEXT_CURSOR_RIGHT),
            (Key::Home, BoundKeyFunction::TEXT_CURSOR_BEGIN),
            (Key::End, BoundKeyFunction::TEXT_CURSOR_END),
            (Key::Up, BoundKeyFunction::TEXT_HISTORY_PREV),
            (Key::Down, BoundKeyFunction::TEXT_HISTORY_NEXT),
        ] {
            registry.bind(key, Modifiers::NONE, function);
        }
        registry
    }

    /// Register a key binding, replacing any existing one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, function: BoundKeyFunction) {
        self.bindings.insert((key, modifiers), function);
    }

    /// Remove a key binding, returning the function it was bound to.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BoundKeyFunction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Exact-match lookup of key + modifiers.
    pub fn resolve(&self, event: &KeyEvent) -> Option<BoundKeyFunction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

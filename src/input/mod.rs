//! Keyboard bindings: crossterm key events to navigation actions.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::navigation::Direction;
use crate::registry::RegionStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Move(Direction),
    Select,
    /// Return to the active region's default zone.
    DefaultZone,
    CycleRegion(RegionStep),
}

/// Key map consulted by the runtime. Bindings ignore modifiers other than
/// Shift, which terminals already fold into `BackTab` and uppercase chars.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, NavAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(KeyCode::Up, NavAction::Move(Direction::Up));
        bindings.insert(KeyCode::Down, NavAction::Move(Direction::Down));
        bindings.insert(KeyCode::Left, NavAction::Move(Direction::Left));
        bindings.insert(KeyCode::Right, NavAction::Move(Direction::Right));
        bindings.insert(KeyCode::Enter, NavAction::Select);
        bindings.insert(KeyCode::Char(' '), NavAction::Select);
        bindings.insert(KeyCode::Esc, NavAction::DefaultZone);
        bindings.insert(KeyCode::Tab, NavAction::CycleRegion(RegionStep::Next));
        bindings.insert(KeyCode::BackTab, NavAction::CycleRegion(RegionStep::Prev));
        Self { bindings }
    }
}

impl KeyBindings {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Vim-style `hjkl` movement on top of the defaults.
    pub fn with_vim_keys() -> Self {
        Self::default()
            .bind(KeyCode::Char('h'), NavAction::Move(Direction::Left))
            .bind(KeyCode::Char('j'), NavAction::Move(Direction::Down))
            .bind(KeyCode::Char('k'), NavAction::Move(Direction::Up))
            .bind(KeyCode::Char('l'), NavAction::Move(Direction::Right))
    }

    pub fn bind(mut self, code: KeyCode, action: NavAction) -> Self {
        self.bindings.insert(code, action);
        self
    }

    pub fn unbind(mut self, code: KeyCode) -> Self {
        self.bindings.remove(&code);
        self
    }

    /// Action for a key press. Releases, and chords with Ctrl or Alt, map to
    /// nothing.
    pub fn resolve(&self, key: &KeyEvent) -> Option<NavAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        self.bindings.get(&key.code).copied()
    }
}

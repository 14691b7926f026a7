//! Host input shapes and crossterm conversions.
//!
//! The host converts device state deltas into these events once per frame and
//! hands them to the [`UiManager`](crate::manager::UiManager). Pointer
//! locations are screen pixels. Crossterm events are converted via `From` impls
//! so the core never depends on a device backend directly.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Vec2;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from any backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Unknown,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    pub const SYSTEM: Modifiers = Modifiers(8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyState / MouseButton / BoundKeyFunction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A named, rebindable input function such as "UIClick".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundKeyFunction(pub &'static str);

impl BoundKeyFunction {
    pub const UI_CLICK: BoundKeyFunction = BoundKeyFunction("UIClick");
    pub const UI_RIGHT_CLICK: BoundKeyFunction = BoundKeyFunction("UIRightClick");
    pub const UI_MIDDLE_CLICK: BoundKeyFunction = BoundKeyFunction("UIMiddleClick");
    pub const TEXT_SUBMIT: BoundKeyFunction = BoundKeyFunction("TextSubmit");
    pub const TEXT_BACKSPACE: BoundKeyFunction = BoundKeyFunction("TextBackspace");
    pub const TEXT_DELETE: BoundKeyFunction = BoundKeyFunction("TextDelete");
    pub const TEXT_CURSOR_LEFT: BoundKeyFunction = BoundKeyFunction("TextCursorLeft");
    pub const TEXT_CURSOR_RIGHT: BoundKeyFunction = BoundKeyFunction("TextCursorRight");
    pub const TEXT_CURSOR_BEGIN: BoundKeyFunction = BoundKeyFunction("TextCursorBegin");
    pub const TEXT_CURSOR_END: BoundKeyFunction = BoundKeyFunction("TextCursorEnd");
    pub const TEXT_HISTORY_PREV: BoundKeyFunction = BoundKeyFunction("TextHistoryPrev");
    pub const TEXT_HISTORY_NEXT: BoundKeyFunction = BoundKeyFunction("TextHistoryNext");

    pub fn name(self) -> &'static str {
        self.0
    }

    /// The click function a mouse button maps to.
    pub fn for_mouse_button(button: MouseButton) -> BoundKeyFunction {
        match button {
            MouseButton::Left => Self::UI_CLICK,
            MouseButton::Right => Self::UI_RIGHT_CLICK,
            MouseButton::Middle => Self::UI_MIDDLE_CLICK,
        }
    }
}

// ---------------------------------------------------------------------------
// Event shapes
// ---------------------------------------------------------------------------

/// A bound-key state transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundKeyEvent {
    pub function: BoundKeyFunction,
    pub state: KeyState,
    pub pointer_location: Vec2,
    /// Whether the press may change keyboard focus and mouse capture.
    pub can_focus: bool,
}

impl BoundKeyEvent {
    pub fn new(function: BoundKeyFunction, state: KeyState, pointer_location: Vec2, can_focus: bool) -> Self {
        Self { function, state, pointer_location, can_focus }
    }
}

/// A raw keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
    pub is_repeat: bool,
    pub pointer_location: Vec2,
}

impl KeyEvent {
    /// Create a key-down event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            state: KeyState::Down,
            is_repeat: false,
            pointer_location: Vec2::ZERO,
        }
    }

    /// Same event, released.
    pub fn released(mut self) -> Self {
        self.state = KeyState::Up;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub state: KeyState,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// Movement since the previous move event, in pixels.
    pub relative: Vec2,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelEvent {
    pub delta: Vec2,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEvent {
    pub code_point: char,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level host input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    MouseButton(MouseButtonEvent),
    /// Pointer moved to an absolute position; the manager derives the delta.
    MouseMove { position: Vec2 },
    MouseWheel(MouseWheelEvent),
    Text(TextEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    if m.contains(crossterm::event::KeyModifiers::SUPER) {
        out = out | Modifiers::SYSTEM;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let code = match ct.code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::BackTab => Key::BackTab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Delete => Key::Delete,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            crossterm::event::KeyCode::PageUp => Key::PageUp,
            crossterm::event::KeyCode::PageDown => Key::PageDown,
            crossterm::event::KeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        };
        let state = match ct.kind {
            crossterm::event::KeyEventKind::Release => KeyState::Up,
            _ => KeyState::Down,
        };
        KeyEvent {
            code,
            modifiers: convert_modifiers(ct.modifiers),
            state,
            is_repeat: ct.kind == crossterm::event::KeyEventKind::Repeat,
            pointer_location: Vec2::ZERO,
        }
    }
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(ct: crossterm::event::Event) -> Self {
        match ct {
            crossterm::event::Event::Key(ke) => InputEvent::Key(KeyEvent::from(ke)),
            crossterm::event::Event::Mouse(me) => {
                let position = Vec2::new(f32::from(me.column), f32::from(me.row));
                let wheel = |delta: Vec2| InputEvent::MouseWheel(MouseWheelEvent { delta, position });
                match me.kind {
                    crossterm::event::MouseEventKind::Down(b) => {
                        InputEvent::MouseButton(MouseButtonEvent {
                            button: convert_mouse_button(b),
                            state: KeyState::Down,
                            position,
                        })
                    }
                    crossterm::event::MouseEventKind::Up(b) => {
                        InputEvent::MouseButton(MouseButtonEvent {
                            button: convert_mouse_button(b),
                            state: KeyState::Up,
                            position,
                        })
                    }
                    crossterm::event::MouseEventKind::Drag(_)
                    | crossterm::event::MouseEventKind::Moved => InputEvent::MouseMove { position },
                    crossterm::event::MouseEventKind::ScrollUp => wheel(Vec2::new(0.0, 1.0)),
                    crossterm::event::MouseEventKind::ScrollDown => wheel(Vec2::new(0.0, -1.0)),
                    crossterm::event::MouseEventKind::ScrollLeft => wheel(Vec2::new(-1.0, 0.0)),
                    crossterm::event::MouseEventKind::ScrollRight => wheel(Vec2::new(1.0, 0.0)),
                }
            }
            crossterm::event::Event::Resize(w, h) => InputEvent::Resize {
                width: w,
                height: h,
            },
            crossterm::event::Event::FocusGained => InputEvent::FocusGained,
            crossterm::event::Event::FocusLost => InputEvent::FocusLost,
            crossterm::event::Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ct_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> KeyEvent {
        KeyEvent::from(crossterm::event::KeyEvent::new(code, mods))
    }

    fn ct_mouse(kind: crossterm::event::MouseEventKind, column: u16, row: u16) -> InputEvent {
        InputEvent::from(crossterm::event::Event::Mouse(crossterm::event::MouseEvent {
            kind,
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }))
    }

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods & Modifiers::CTRL, Modifiers::CTRL);
        assert!(Modifiers::NONE.is_empty());
    }

    // ── Bound functions ──────────────────────────────────────────────

    #[test]
    fn mouse_buttons_map_to_click_functions() {
        assert_eq!(BoundKeyFunction::for_mouse_button(MouseButton::Left), BoundKeyFunction::UI_CLICK);
        assert_eq!(
            BoundKeyFunction::for_mouse_button(MouseButton::Right).name(),
            "UIRightClick"
        );
        assert_eq!(
            BoundKeyFunction::for_mouse_button(MouseButton::Middle),
            BoundKeyFunction::UI_MIDDLE_CLICK
        );
    }

    // ── From<crossterm::event::KeyEvent> ─────────────────────────────

    #[test]
    fn from_crossterm_key_char_with_ctrl() {
        let ke = ct_key(
            crossterm::event::KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        assert_eq!(ke.code, Key::Char('c'));
        assert!(ke.modifiers.contains(Modifiers::CTRL));
        assert_eq!(ke.state, KeyState::Down);
        assert!(!ke.is_repeat);
    }

    #[test]
    fn from_crossterm_key_navigation() {
        for (ct_code, expected) in [
            (crossterm::event::KeyCode::Home, Key::Home),
            (crossterm::event::KeyCode::End, Key::End),
            (crossterm::event::KeyCode::Backspace, Key::Backspace),
            (crossterm::event::KeyCode::Esc, Key::Escape),
            (crossterm::event::KeyCode::F(5), Key::F(5)),
            (crossterm::event::KeyCode::Insert, Key::Unknown),
        ] {
            let ke = ct_key(ct_code, crossterm::event::KeyModifiers::NONE);
            assert_eq!(ke.code, expected);
        }
    }

    #[test]
    fn from_crossterm_key_release() {
        let mut ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        );
        ct.kind = crossterm::event::KeyEventKind::Release;
        assert_eq!(KeyEvent::from(ct).state, KeyState::Up);
    }

    // ── From<crossterm::event::Event> ────────────────────────────────

    #[test]
    fn from_crossterm_mouse_down() {
        let ev = ct_mouse(
            crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            3,
            4,
        );
        assert_eq!(
            ev,
            InputEvent::MouseButton(MouseButtonEvent {
                button: MouseButton::Left,
                state: KeyState::Down,
                position: Vec2::new(3.0, 4.0),
            })
        );
    }

    #[test]
    fn from_crossterm_mouse_drag_is_move() {
        let ev = ct_mouse(
            crossterm::event::MouseEventKind::Drag(crossterm::event::MouseButton::Left),
            9,
            1,
        );
        assert_eq!(ev, InputEvent::MouseMove { position: Vec2::new(9.0, 1.0) });
    }

    #[test]
    fn from_crossterm_scroll() {
        let ev = ct_mouse(crossterm::event::MouseEventKind::ScrollDown, 0, 0);
        match ev {
            InputEvent::MouseWheel(w) => assert_eq!(w.delta, Vec2::new(0.0, -1.0)),
            other => panic!("expected wheel event, got {other:?}"),
        }
    }

    #[test]
    fn from_crossterm_event_resize() {
        let input = InputEvent::from(crossterm::event::Event::Resize(120, 40));
        assert_eq!(
            input,
            InputEvent::Resize {
                width: 120,
                height: 40
            }
        );
    }
}

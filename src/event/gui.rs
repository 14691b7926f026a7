//! Control-relative events delivered to behavior hooks.
//!
//! Each event carries positions relative to the control currently handling it.
//! While bubbling, the manager offsets the relative fields by the handler's
//! position before moving on to its parent.

use crate::control::ControlId;
use crate::geometry::{Point, Vec2};

use super::input::{BoundKeyFunction, Key, KeyState, Modifiers};

/// Shared surface of events that bubble up the tree.
pub trait RoutedEvent {
    fn is_handled(&self) -> bool;
    /// Shift the relative fields from a child's space into its parent's.
    fn offset_by(&mut self, position: Vec2, pixel_position: Point);
    /// Record which control the event is being delivered to.
    fn set_source(&mut self, _control: ControlId) {}
}

// ---------------------------------------------------------------------------
// GuiBoundKeyEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GuiBoundKeyEvent {
    pub function: BoundKeyFunction,
    pub state: KeyState,
    /// Screen pixel location of the pointer.
    pub pointer_location: Vec2,
    pub can_focus: bool,
    pub relative_position: Vec2,
    pub relative_pixel_position: Vec2,
    handled: bool,
}

impl GuiBoundKeyEvent {
    pub fn new(
        function: BoundKeyFunction,
        state: KeyState,
        pointer_location: Vec2,
        can_focus: bool,
        relative_position: Vec2,
        relative_pixel_position: Vec2,
    ) -> Self {
        Self {
            function,
            state,
            pointer_location,
            can_focus,
            relative_position,
            relative_pixel_position,
            handled: false,
        }
    }

    /// Stop the event from bubbling further.
    pub fn handle(&mut self) {
        self.handled = true;
    }
}

impl RoutedEvent for GuiBoundKeyEvent {
    fn is_handled(&self) -> bool {
        self.handled
    }

    fn offset_by(&mut self, position: Vec2, pixel_position: Point) {
        self.relative_position += position;
        self.relative_pixel_position += pixel_position.to_vec2();
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GuiMouseMoveEvent {
    /// Movement since the last move, in logical units.
    pub relative: Vec2,
    pub source_control: ControlId,
    pub global_position: Vec2,
    pub global_pixel_position: Vec2,
    pub relative_position: Vec2,
    pub relative_pixel_position: Vec2,
    handled: bool,
}

impl GuiMouseMoveEvent {
    pub fn new(
        relative: Vec2,
        source_control: ControlId,
        global_position: Vec2,
        global_pixel_position: Vec2,
        relative_position: Vec2,
        relative_pixel_position: Vec2,
    ) -> Self {
        Self {
            relative,
            source_control,
            global_position,
            global_pixel_position,
            relative_position,
            relative_pixel_position,
            handled: false,
        }
    }

    pub fn handle(&mut self) {
        self.handled = true;
    }
}

impl RoutedEvent for GuiMouseMoveEvent {
    fn is_handled(&self) -> bool {
        self.handled
    }

    fn offset_by(&mut self, position: Vec2, pixel_position: Point) {
        self.relative_position += position;
        self.relative_pixel_position += pixel_position.to_vec2();
    }

    fn set_source(&mut self, control: ControlId) {
        self.source_control = control;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuiMouseWheelEvent {
    pub delta: Vec2,
    pub source_control: ControlId,
    pub global_position: Vec2,
    pub global_pixel_position: Vec2,
    pub relative_position: Vec2,
    pub relative_pixel_position: Vec2,
    handled: bool,
}

impl GuiMouseWheelEvent {
    pub fn new(
        delta: Vec2,
        source_control: ControlId,
        global_position: Vec2,
        global_pixel_position: Vec2,
        relative_position: Vec2,
        relative_pixel_position: Vec2,
    ) -> Self {
        Self {
            delta,
            source_control,
            global_position,
            global_pixel_position,
            relative_position,
            relative_pixel_position,
            handled: false,
        }
    }

    pub fn handle(&mut self) {
        self.handled = true;
    }
}

impl RoutedEvent for GuiMouseWheelEvent {
    fn is_handled(&self) -> bool {
        self.handled
    }

    fn offset_by(&mut self, position: Vec2, pixel_position: Point) {
        self.relative_position += position;
        self.relative_pixel_position += pixel_position.to_vec2();
    }

    fn set_source(&mut self, control: ControlId) {
        self.source_control = control;
    }
}

// ---------------------------------------------------------------------------
// Keyboard and text
// ---------------------------------------------------------------------------

/// Raw key transition delivered to the keyboard-focused control.
#[derive(Debug, Clone, PartialEq)]
pub struct GuiKeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
    pub is_repeat: bool,
    handled: bool,
}

impl GuiKeyEvent {
    pub fn new(key: Key, modifiers: Modifiers, state: KeyState, is_repeat: bool) -> Self {
        Self { key, modifiers, state, is_repeat, handled: false }
    }

    pub fn handle(&mut self) {
        self.handled = true;
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuiTextEvent {
    pub source_control: ControlId,
    pub code_point: char,
    handled: bool,
}

impl GuiTextEvent {
    pub fn new(source_control: ControlId, code_point: char) -> Self {
        Self { source_control, code_point, handled: false }
    }

    pub fn handle(&mut self) {
        self.handled = true;
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

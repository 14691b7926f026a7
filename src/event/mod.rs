//! Event system: host input, control-relative events, key bindings, notifications.

pub mod binding;
pub mod gui;
pub mod input;
pub mod queue;

pub use binding::KeyBindingRegistry;
pub use gui::{
    GuiBoundKeyEvent, GuiKeyEvent, GuiMouseMoveEvent, GuiMouseWheelEvent, GuiTextEvent, RoutedEvent,
};
pub use input::{
    BoundKeyEvent, BoundKeyFunction, InputEvent, Key, KeyEvent, KeyState, Modifiers, MouseButton,
    MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextEvent,
};
pub use queue::{EventQueue, UiEvent, UiEventKind};

//! Built-in controls: BaseControl, containers, Button, Popup.

pub mod base;
pub mod button;
pub mod containers;
pub mod popup;

pub use base::BaseControl;
pub use button::{Button, DrawMode};
pub use containers::{BoxContainer, LayoutContainer, PanelContainer};
pub use popup::Popup;

/// Stylesheet source covering the built-in widgets.
///
/// Style boxes cannot be written in stylesheet text; they come from the
/// [`Theme`](crate::style::Theme).
pub const DEFAULT_STYLESHEET: &str = r#"
/* Containers */
BoxContainer { separation: 1; }

/* Buttons */
Button:normal { font-color: 0.9 0.9 0.9; }
Button:hover { font-color: 1 1 1; }
Button:pressed { font-color: 0.7 0.7 0.7; }
Button:disabled { font-color: 0.5 0.5 0.5; modulate-self: 1 1 1 0.5; }
"#;

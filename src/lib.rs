//! # gilt-gui
//!
//! A retained-mode control tree for game-engine user interfaces, styled by
//! stylesheets and laid out in logical units scaled to pixels.
//!
//! The host owns the game loop. Each frame it feeds input to the
//! [`UiManager`], calls [`UiManager::frame_update`] to flush pending style
//! and layout work, and hands a [`RenderHandle`](render::RenderHandle) to
//! [`UiManager::render`].
//!
//! ## Core Systems
//!
//! - **[`control`]**: slotmap-backed control arena and the behavior hook trait
//! - **[`style`]**: stylesheet tokenizer, parser, selectors, specificity, theme
//! - **[`layout`]**: anchor/margin math, taffy-backed box stacking, minimum-size and arrangement passes
//! - **[`event`]**: host input shapes, crossterm conversions, control-relative events, notifications
//! - **[`manager`]**: the `UiManager` orchestrating tree, style, layout, input, focus and modals
//! - **[`render`]**: backend traits and the clipping, culling render traversal
//! - **[`widgets`]**: BaseControl, LayoutContainer, BoxContainer, PanelContainer, Button, Popup
//! - **[`testing`]**: recording renderer and input harness
//! - **[`geometry`]**: Vec2, Point, Rect, PixelRect, Color

// Foundation
pub mod config;
pub mod error;
pub mod geometry;

// Core systems
pub mod control;
pub mod layout;
pub mod style;

// Input and notifications
pub mod event;

// Orchestration
pub mod manager;

// Rendering
pub mod render;

// Controls
pub mod widgets;

// Headless tooling
pub mod testing;

pub use config::UiConfig;
pub use control::{ControlBehavior, ControlData, ControlId, LayoutPreset, MouseFilterMode, SizeFlags};
pub use error::{UiError, UiResult};
pub use manager::UiManager;

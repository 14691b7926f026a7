//! Button widget: a clickable control with a centered label.
//!
//! The button tracks hover and press state and mirrors the resulting
//! [`DrawMode`] into a single style pseudo-class, so stylesheets can target
//! `Button:hover`, `Button:pressed` and so on. A click that is released over
//! the button emits [`UiEventKind::Pressed`].

use std::any::Any;
use std::rc::Rc;

use tracing::warn;

use crate::control::{ControlBehavior, ControlId};
use crate::error::{UiError, UiResult};
use crate::event::{BoundKeyFunction, GuiBoundKeyEvent, UiEventKind};
use crate::geometry::{Color, PixelRect, Point, Vec2};
use crate::manager::UiManager;
use crate::render::DrawingHandle;
use crate::style::StyleBox;

/// Button background and content margins.
pub const STYLEBOX_PROPERTY: &str = "stylebox";

/// Label color.
pub const FONT_COLOR_PROPERTY: &str = "font-color";

// ---------------------------------------------------------------------------
// DrawMode
// ---------------------------------------------------------------------------

/// Visual state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Normal,
    Hover,
    Pressed,
    Disabled,
}

impl DrawMode {
    /// The style pseudo-class carried while in this mode.
    pub fn pseudo_class(self) -> &'static str {
        match self {
            DrawMode::Normal => "normal",
            DrawMode::Hover => "hover",
            DrawMode::Pressed => "pressed",
            DrawMode::Disabled => "disabled",
        }
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A clickable button.
///
/// The label is measured in character cells: one logical unit per char,
/// one unit tall.
///
/// # Examples
///
/// ```ignore
/// let ok = ui.create(Button::new("OK"))?;
/// let toggle = ui.create(Button::new("Mute").toggle_mode(true))?;
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    disabled: bool,
    toggle_mode: bool,
    pressed: bool,
    being_pressed: bool,
    hovered: bool,
}

impl Button {
    pub const TYPE_CHAIN: &'static [&'static str] = &["Button", "ContainerButton", "BaseButton", "Control"];

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            toggle_mode: false,
            pressed: false,
            being_pressed: false,
            hovered: false,
        }
    }

    /// Start disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Flip `is_pressed` on every click instead of staying released (builder).
    pub fn toggle_mode(mut self, toggle_mode: bool) -> Self {
        self.toggle_mode = toggle_mode;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Toggle state. Always false outside toggle mode.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn draw_mode(&self) -> DrawMode {
        if self.disabled {
            return DrawMode::Disabled;
        }
        let attempting = self.being_pressed && self.hovered;
        if self.pressed != attempting {
            DrawMode::Pressed
        } else if self.hovered {
            DrawMode::Hover
        } else {
            DrawMode::Normal
        }
    }

    fn label_size(&self) -> Vec2 {
        Vec2::new(self.label.chars().count() as f32, 1.0)
    }

    fn stylebox(ui: &UiManager, id: ControlId) -> Option<Rc<StyleBox>> {
        ui.style_property_or_theme::<Rc<StyleBox>>(id, STYLEBOX_PROPERTY)
    }

    fn apply_draw_mode(&self, ui: &mut UiManager, id: ControlId) {
        if let Err(error) = ui.set_only_style_pseudo_class(id, self.draw_mode().pseudo_class()) {
            warn!(%error, "button draw mode not applied");
        }
    }

    /// Run `f` on the button behind `id` and refresh its draw mode.
    fn modify(ui: &mut UiManager, id: ControlId, f: impl FnOnce(&mut Button)) -> UiResult<()> {
        let button = ui
            .behavior_mut::<Button>(id)
            .ok_or_else(|| UiError::InvalidOperation(format!("control {id:?} is not a button")))?;
        f(button);
        let mode = button.draw_mode();
        ui.set_only_style_pseudo_class(id, mode.pseudo_class())
    }

    pub fn set_disabled(ui: &mut UiManager, id: ControlId, disabled: bool) -> UiResult<()> {
        Self::modify(ui, id, |b| {
            b.disabled = disabled;
            if disabled {
                b.being_pressed = false;
            }
        })
    }

    pub fn set_pressed(ui: &mut UiManager, id: ControlId, pressed: bool) -> UiResult<()> {
        Self::modify(ui, id, |b| b.pressed = pressed && b.toggle_mode)
    }

    pub fn set_label(ui: &mut UiManager, id: ControlId, label: &str) -> UiResult<()> {
        Self::modify(ui, id, |b| b.label = label.to_string())?;
        ui.minimum_size_changed(id);
        Ok(())
    }
}

impl ControlBehavior for Button {
    fn type_chain(&self) -> &'static [&'static str] {
        Self::TYPE_CHAIN
    }

    fn initialize(&mut self, ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        ui.set_only_style_pseudo_class(id, self.draw_mode().pseudo_class())
    }

    fn calculate_minimum_size(&self, ui: &UiManager, id: ControlId) -> Vec2 {
        let chrome = Self::stylebox(ui, id)
            .map(|b| b.minimum_size())
            .unwrap_or(Vec2::ZERO);
        self.label_size() + chrome
    }

    fn draw(&self, ui: &UiManager, id: ControlId, handle: &mut dyn DrawingHandle) {
        let Ok(size) = ui.pixel_size(id) else {
            return;
        };
        let rect = PixelRect::from_dimensions(Point::ZERO, size);
        let content = match Self::stylebox(ui, id) {
            Some(stylebox) => {
                stylebox.draw(handle, rect);
                stylebox.content_box(rect)
            }
            None => rect,
        };

        let label = ui.to_pixels(self.label_size());
        let x = content.left + (content.width() - label.x).max(0) / 2;
        let y = content.top + (content.height() - label.y).max(0) / 2;
        let color = ui
            .style_property_or_theme::<Color>(id, FONT_COLOR_PROPERTY)
            .unwrap_or(Color::WHITE);
        handle.draw_string(Vec2::new(x as f32, y as f32), &self.label, color);
    }

    fn key_bind_down(&mut self, ui: &mut UiManager, id: ControlId, event: &mut GuiBoundKeyEvent) {
        if self.disabled || event.function != BoundKeyFunction::UI_CLICK {
            return;
        }
        self.being_pressed = true;
        self.apply_draw_mode(ui, id);
        event.handle();
    }

    fn key_bind_up(&mut self, ui: &mut UiManager, id: ControlId, event: &mut GuiBoundKeyEvent) {
        if event.function != BoundKeyFunction::UI_CLICK || !self.being_pressed {
            return;
        }
        self.being_pressed = false;
        let inside = ui
            .data(id)
            .is_ok_and(|data| self.has_point(data, event.relative_position));
        if inside && !self.disabled {
            if self.toggle_mode {
                self.pressed = !self.pressed;
            }
            ui.emit(id, UiEventKind::Pressed);
        }
        self.apply_draw_mode(ui, id);
        event.handle();
    }

    fn mouse_entered(&mut self, ui: &mut UiManager, id: ControlId) {
        self.hovered = true;
        self.apply_draw_mode(ui, id);
    }

    fn mouse_exited(&mut self, ui: &mut UiManager, id: ControlId) {
        self.hovered = false;
        self.apply_draw_mode(ui, id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

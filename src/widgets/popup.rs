//! Popup: a hidden control shown as a modal on demand.

use std::any::Any;

use tracing::debug;

use crate::control::{ControlBehavior, ControlId, LayoutPreset};
use crate::error::UiResult;
use crate::geometry::{Rect, Vec2};
use crate::manager::UiManager;

/// Starts hidden. [`Popup::open`] shows it on top of the modal stack; a
/// press outside dismisses it and it hides itself again.
///
/// Children are stretched over the popup's whole rectangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Popup;

impl Popup {
    pub const TYPE_CHAIN: &'static [&'static str] = &["Popup", "Control"];

    /// Show `id` at `rect` (logical, relative to its parent) and push it as
    /// the topmost modal. A popup without a parent is placed under the
    /// modal root. Reopening an open popup moves it to the top.
    pub fn open(ui: &mut UiManager, id: ControlId, rect: Rect) -> UiResult<()> {
        if ui.data(id)?.visible {
            ui.remove_modal(id);
        }
        if ui.parent(id).is_none() {
            ui.add_child(ui.modal_root(), id)?;
        }

        ui.set_anchor_preset(id, LayoutPreset::TopLeft)?;
        ui.set_margins(id, [rect.left, rect.top, rect.right, rect.bottom])?;
        ui.set_position(id, rect.top_left())?;
        ui.set_size(id, rect.size())?;
        ui.set_visible(id, true)?;
        ui.push_modal(id)?;
        debug!(popup = ?id, "popup opened");
        Ok(())
    }

    /// Hide `id` by dropping it from the modal stack.
    pub fn close(ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        ui.data(id)?;
        if !ui.remove_modal(id) {
            ui.set_visible(id, false)?;
        }
        Ok(())
    }
}

impl ControlBehavior for Popup {
    fn type_chain(&self) -> &'static [&'static str] {
        Self::TYPE_CHAIN
    }

    fn initialize(&mut self, ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        ui.set_visible(id, false)
    }

    fn layout_children(&mut self, ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        let size = ui.data(id)?.size;
        for child in ui.children(id).to_vec() {
            ui.set_child_rect(child, Rect::from_dimensions(Vec2::ZERO, size))?;
        }
        Ok(())
    }

    fn modal_removed(&mut self, ui: &mut UiManager, id: ControlId) {
        if let Err(error) = ui.set_visible(id, false) {
            debug!(%error, "popup already gone");
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyState, MouseButton, MouseButtonEvent, UiEventKind};
    use crate::widgets::BaseControl;
    use pretty_assertions::assert_eq;

    fn click(ui: &mut UiManager, x: f32, y: f32) -> bool {
        ui.mouse_button_down(MouseButtonEvent {
            button: MouseButton::Left,
            state: KeyState::Down,
            position: Vec2::new(x, y),
        })
    }

    #[test]
    fn starts_hidden_and_opens_under_modal_root() {
        let mut ui = UiManager::new_testing();
        let popup = ui.create(Popup).expect("popup");
        assert!(!ui.data(popup).expect("data").visible);

        Popup::open(&mut ui, popup, Rect::new(100.0, 100.0, 200.0, 150.0)).expect("open");
        assert_eq!(ui.parent(popup), Some(ui.modal_root()));
        assert_eq!(ui.modal_stack(), &[popup]);
        assert!(ui.data(popup).expect("data").visible);

        ui.frame_update(0.0).expect("frame");
        let data = ui.data(popup).expect("data");
        assert_eq!((data.position, data.size), (Vec2::new(100.0, 100.0), Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn outside_press_dismisses_and_hides() {
        let mut ui = UiManager::new_testing();
        let popup = ui.create(Popup).expect("popup");
        Popup::open(&mut ui, popup, Rect::new(100.0, 100.0, 200.0, 150.0)).expect("open");
        ui.frame_update(0.0).expect("frame");
        ui.drain_events();

        assert!(!click(&mut ui, 10.0, 10.0));
        assert!(ui.modal_stack().is_empty());
        assert!(!ui.data(popup).expect("data").visible);
        assert!(ui
            .drain_events()
            .iter()
            .any(|e| e.control == popup && e.kind == UiEventKind::ModalRemoved));
    }

    #[test]
    fn inside_press_reaches_children() {
        let mut ui = UiManager::new_testing();
        let popup = ui.create(Popup).expect("popup");
        let content = ui.create(BaseControl).expect("content");
        ui.add_child(popup, content).expect("add");
        Popup::open(&mut ui, popup, Rect::new(100.0, 100.0, 200.0, 150.0)).expect("open");
        ui.frame_update(0.0).expect("frame");

        click(&mut ui, 150.0, 120.0);
        assert_eq!(ui.modal_stack(), &[popup]);
        assert_eq!(ui.mouse_captured(), Some(content));
    }

    #[test]
    fn close_hides_without_modal() {
        let mut ui = UiManager::new_testing();
        let popup = ui.create(Popup).expect("popup");
        Popup::open(&mut ui, popup, Rect::new(0.0, 0.0, 10.0, 10.0)).expect("open");
        Popup::close(&mut ui, popup).expect("close");
        assert!(ui.modal_stack().is_empty());
        assert!(!ui.data(popup).expect("data").visible);

        Popup::close(&mut ui, popup).expect("close again");
    }
}

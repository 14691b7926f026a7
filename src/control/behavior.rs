//! The behavior hook trait every concrete control implements.
//!
//! A control is a [`ControlData`] node plus one boxed [`ControlBehavior`].
//! Concrete widgets override only the hooks they care about; every hook has a
//! default that matches a plain control.
//!
//! Mutating hooks receive `&mut UiManager` as explicit context together with
//! the id of the control they belong to. While a hook runs, the behavior is
//! checked out of the tree, so `ui.behavior(id)` is `None` for the duration.
//! Notification hooks fired at that same control in the meantime are
//! delivered as soon as the running hook returns.

use std::any::Any;

use crate::event::{GuiBoundKeyEvent, GuiKeyEvent, GuiMouseMoveEvent, GuiMouseWheelEvent, GuiTextEvent};
use crate::geometry::Vec2;
use crate::manager::UiManager;
use crate::render::DrawingHandle;

use super::node::{ControlData, ControlId};

/// Core trait implemented by all controls.
///
/// The trait is object-safe; controls are stored as `Box<dyn ControlBehavior>`.
pub trait ControlBehavior: Any {
    /// Concrete type name followed by its ancestors, ending in `"Control"`.
    ///
    /// Drives type selectors and type-indexed rule lookup.
    fn type_chain(&self) -> &'static [&'static str];

    /// Called once after the control is inserted into the arena, before it
    /// has a parent. Composite widgets create and attach their parts here.
    fn initialize(&mut self, _ui: &mut UiManager, _id: ControlId) -> crate::UiResult<()> {
        Ok(())
    }

    // ── Layout ───────────────────────────────────────────────────────

    /// The control's own minimum size. Must be free of side effects.
    ///
    /// Children's combined minimum sizes are already up to date when this
    /// runs and can be read with [`UiManager::cached_combined_minimum_size`].
    fn calculate_minimum_size(&self, _ui: &UiManager, _id: ControlId) -> Vec2 {
        Vec2::ZERO
    }

    /// Arrange direct children. Called during the layout pass.
    fn layout_children(&mut self, _ui: &mut UiManager, _id: ControlId) -> crate::UiResult<()> {
        Ok(())
    }

    /// Local hit test in logical units relative to the control's top-left.
    fn has_point(&self, data: &ControlData, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= data.size.x && point.y >= 0.0 && point.y <= data.size.y
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Draw the control's own content. Transform, modulate and scissor are
    /// already set; the control's box starts at the handle's origin.
    fn draw(&self, _ui: &UiManager, _id: ControlId, _handle: &mut dyn DrawingHandle) {}

    // ── Per-frame ────────────────────────────────────────────────────

    fn update(&mut self, _ui: &mut UiManager, _id: ControlId, _dt: f32) {}

    fn frame_update(&mut self, _ui: &mut UiManager, _id: ControlId, _dt: f32) {}

    // ── Input ────────────────────────────────────────────────────────

    fn key_bind_down(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiBoundKeyEvent) {}

    fn key_bind_up(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiBoundKeyEvent) {}

    fn key_down(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiKeyEvent) {}

    fn key_up(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiKeyEvent) {}

    fn mouse_move(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiMouseMoveEvent) {}

    fn mouse_wheel(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiMouseWheelEvent) {}

    fn text_entered(&mut self, _ui: &mut UiManager, _id: ControlId, _event: &mut GuiTextEvent) {}

    // ── Notifications ────────────────────────────────────────────────

    fn mouse_entered(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn mouse_exited(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn focus_entered(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn focus_exited(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn modal_removed(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn entered_tree(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn exited_tree(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn resized(&mut self, _ui: &mut UiManager, _id: ControlId) {}

    fn ui_scale_changed(&mut self, ui: &mut UiManager, id: ControlId) {
        ui.minimum_size_changed(id);
    }

    /// Called after a style pass rebuilt the resolved property map.
    fn style_properties_changed(&mut self, ui: &mut UiManager, id: ControlId) {
        ui.minimum_size_changed(id);
    }

    // ── Downcasting ──────────────────────────────────────────────────

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

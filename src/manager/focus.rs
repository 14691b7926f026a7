//! Keyboard focus, hover/capture cleanup, and the modal stack.

use tracing::debug;

use crate::control::ControlId;
use crate::error::{UiError, UiResult};
use crate::event::UiEventKind;

use super::UiManager;

impl UiManager {
    // ── Keyboard focus ───────────────────────────────────────────────

    pub fn keyboard_focused(&self) -> Option<ControlId> {
        self.keyboard_focused
    }

    pub fn has_keyboard_focus(&self, id: ControlId) -> bool {
        self.keyboard_focused == Some(id)
    }

    /// Give `id` keyboard focus, releasing whoever held it.
    ///
    /// `id` must be focusable, inside the tree and visible.
    pub fn grab_keyboard_focus(&mut self, id: ControlId) -> UiResult<()> {
        if !self.data(id)?.can_keyboard_focus {
            return Err(UiError::InvalidArgument(format!(
                "control {id:?} cannot take keyboard focus"
            )));
        }
        self.require_visible_in_tree(id, "take keyboard focus")?;
        if self.keyboard_focused == Some(id) {
            return Ok(());
        }
        self.release_keyboard_focus();
        debug!(control = ?id, "keyboard focus grabbed");
        self.keyboard_focused = Some(id);
        self.fire(id, UiEventKind::FocusEntered);
        Ok(())
    }

    pub fn release_keyboard_focus(&mut self) {
        if let Some(old) = self.keyboard_focused.take() {
            debug!(control = ?old, "keyboard focus released");
            self.fire(old, UiEventKind::FocusExited);
        }
    }

    /// Release focus only if `id` holds it.
    pub fn release_keyboard_focus_if(&mut self, id: ControlId) {
        if self.keyboard_focused == Some(id) {
            self.release_keyboard_focus();
        }
    }

    // ── Hover and capture ────────────────────────────────────────────

    pub fn currently_hovered(&self) -> Option<ControlId> {
        self.currently_hovered
    }

    /// Control holding the mouse capture since the last focusing press.
    pub fn mouse_captured(&self) -> Option<ControlId> {
        self.control_focused
    }

    fn require_visible_in_tree(&self, id: ControlId, action: &str) -> UiResult<()> {
        if self.is_visible_in_tree(id)? {
            Ok(())
        } else {
            Err(UiError::InvalidArgument(format!(
                "control {id:?} is hidden or outside the tree and cannot {action}"
            )))
        }
    }

    /// Drop every manager reference to `id`.
    pub(crate) fn control_removed_from_tree(&mut self, id: ControlId) {
        self.release_keyboard_focus_if(id);
        self.remove_modal(id);
        if self.currently_hovered == Some(id) {
            self.currently_hovered = None;
            self.fire(id, UiEventKind::MouseExited);
        }
        if self.control_focused == Some(id) {
            self.control_focused = None;
        }
    }

    // ── Modals ───────────────────────────────────────────────────────

    /// Modal stack, bottom first.
    pub fn modal_stack(&self) -> &[ControlId] {
        &self.modal_stack
    }

    /// Push `id` on top of the modal stack. `id` must be inside the tree
    /// and visible.
    pub fn push_modal(&mut self, id: ControlId) -> UiResult<()> {
        self.require_visible_in_tree(id, "become modal")?;
        if !self.modal_stack.contains(&id) {
            self.modal_stack.push(id);
        }
        Ok(())
    }

    /// Remove `id` from anywhere in the stack. Returns whether it was there.
    pub fn remove_modal(&mut self, id: ControlId) -> bool {
        let Some(index) = self.modal_stack.iter().position(|&m| m == id) else {
            return false;
        };
        self.modal_stack.remove(index);
        self.fire(id, UiEventKind::ModalRemoved);
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlBehavior;
    use crate::event::{GuiBoundKeyEvent, KeyState, MouseButton, MouseButtonEvent};
    use crate::geometry::Vec2;
    use crate::widgets::BaseControl;

    use std::any::Any;

    /// Takes focus from inside its own press handler.
    #[derive(Default)]
    struct FocusOnPress {
        focus_entered: usize,
    }

    impl ControlBehavior for FocusOnPress {
        fn type_chain(&self) -> &'static [&'static str] {
            &["Control"]
        }

        fn key_bind_down(&mut self, ui: &mut UiManager, id: ControlId, event: &mut GuiBoundKeyEvent) {
            ui.grab_keyboard_focus(id).expect("grab");
            event.handle();
        }

        fn focus_entered(&mut self, _ui: &mut UiManager, _id: ControlId) {
            self.focus_entered += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn focusable(ui: &mut UiManager) -> ControlId {
        let c = ui.create(BaseControl).expect("create");
        ui.set_can_keyboard_focus(c, true).expect("focusable");
        ui.add_child(ui.window_root(), c).expect("add");
        c
    }

    // ── Keyboard focus ───────────────────────────────────────────────

    #[test]
    fn grab_requires_focusable() {
        let mut ui = UiManager::new_testing();
        let c = ui.create(BaseControl).expect("create");
        assert!(matches!(ui.grab_keyboard_focus(c), Err(UiError::InvalidArgument(_))));
    }

    #[test]
    fn grab_moves_focus_with_notifications() {
        let mut ui = UiManager::new_testing();
        let a = focusable(&mut ui);
        let b = focusable(&mut ui);
        ui.grab_keyboard_focus(a).expect("grab");
        ui.drain_events();

        ui.grab_keyboard_focus(a).expect("regrab");
        assert!(ui.drain_events().is_empty());

        ui.grab_keyboard_focus(b).expect("grab");
        let kinds: Vec<_> = ui.drain_events().into_iter().map(|e| (e.control, e.kind)).collect();
        assert_eq!(kinds, vec![(a, UiEventKind::FocusExited), (b, UiEventKind::FocusEntered)]);
        assert!(ui.has_keyboard_focus(b));
    }

    #[test]
    fn focus_grabbed_from_own_hook_is_delivered() {
        let mut ui = UiManager::new_testing();
        let c = ui.create(FocusOnPress::default()).expect("create");
        ui.set_can_keyboard_focus(c, true).expect("focusable");
        ui.set_margins(c, [0.0, 0.0, 10.0, 10.0]).expect("margins");
        ui.add_child(ui.window_root(), c).expect("add");
        ui.frame_update(0.0).expect("frame");
        ui.drain_events();

        ui.mouse_button_down(MouseButtonEvent {
            button: MouseButton::Left,
            state: KeyState::Down,
            position: Vec2::new(5.0, 5.0),
        });
        assert_eq!(ui.keyboard_focused(), Some(c));
        assert_eq!(ui.behavior::<FocusOnPress>(c).expect("behavior").focus_entered, 1);
        let kinds: Vec<_> = ui.drain_events().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![UiEventKind::FocusEntered]);
    }

    #[test]
    fn conditional_release() {
        let mut ui = UiManager::new_testing();
        let a = focusable(&mut ui);
        let b = focusable(&mut ui);
        ui.grab_keyboard_focus(a).expect("grab");
        ui.release_keyboard_focus_if(b);
        assert_eq!(ui.keyboard_focused(), Some(a));
        ui.release_keyboard_focus_if(a);
        assert_eq!(ui.keyboard_focused(), None);
    }

    #[test]
    fn removal_releases_focus() {
        let mut ui = UiManager::new_testing();
        let parent = ui.create(BaseControl).expect("parent");
        ui.add_child(ui.window_root(), parent).expect("add");
        let f = ui.create(BaseControl).expect("f");
        ui.set_can_keyboard_focus(f, true).expect("focusable");
        ui.add_child(parent, f).expect("add");
        ui.grab_keyboard_focus(f).expect("grab");

        ui.remove_child(parent, f).expect("remove");
        assert_eq!(ui.keyboard_focused(), None);
    }

    // ── Modals ───────────────────────────────────────────────────────

    #[test]
    fn remove_modal_from_anywhere() {
        let mut ui = UiManager::new_testing();
        let a = focusable(&mut ui);
        let b = focusable(&mut ui);
        ui.push_modal(a).expect("push");
        ui.push_modal(b).expect("push");
        ui.drain_events();

        assert!(ui.remove_modal(a));
        assert!(!ui.remove_modal(a));
        assert_eq!(ui.modal_stack(), &[b]);
        assert_eq!(
            ui.drain_events().into_iter().map(|e| e.kind).collect::<Vec<_>>(),
            vec![UiEventKind::ModalRemoved]
        );
    }

    #[test]
    fn detached_or_hidden_controls_are_rejected() {
        let mut ui = UiManager::new_testing();
        let detached = ui.create(BaseControl).expect("create");
        ui.set_can_keyboard_focus(detached, true).expect("focusable");
        assert!(matches!(ui.grab_keyboard_focus(detached), Err(UiError::InvalidArgument(_))));
        assert!(matches!(ui.push_modal(detached), Err(UiError::InvalidArgument(_))));

        let parent = focusable(&mut ui);
        let child = ui.create(BaseControl).expect("create");
        ui.set_can_keyboard_focus(child, true).expect("focusable");
        ui.add_child(parent, child).expect("add");
        ui.set_visible(parent, false).expect("hide");
        assert!(matches!(ui.grab_keyboard_focus(child), Err(UiError::InvalidArgument(_))));
        assert!(matches!(ui.push_modal(child), Err(UiError::InvalidArgument(_))));

        ui.dispose(detached).expect("dispose");
        assert_eq!(ui.keyboard_focused(), None);
        assert!(ui.modal_stack().is_empty());
    }

    #[test]
    fn disposing_detached_subtree_drops_every_reference() {
        let mut ui = UiManager::new_testing();
        let parent = ui.create(BaseControl).expect("parent");
        let child = ui.create(BaseControl).expect("child");
        ui.add_child(parent, child).expect("add");
        ui.keyboard_focused = Some(child);
        ui.modal_stack.push(child);
        ui.control_focused = Some(child);
        ui.currently_hovered = Some(child);

        ui.dispose(parent).expect("dispose");
        assert!(ui.tree().get(child).is_none());
        assert_eq!(ui.keyboard_focused(), None);
        assert!(ui.modal_stack().is_empty());
        assert_eq!(ui.mouse_captured(), None);
        assert_eq!(ui.currently_hovered(), None);
    }

    #[test]
    fn disposed_modal_leaves_stack() {
        let mut ui = UiManager::new_testing();
        let a = focusable(&mut ui);
        ui.push_modal(a).expect("push");
        ui.dispose(a).expect("dispose");
        assert!(ui.modal_stack().is_empty());
    }
}

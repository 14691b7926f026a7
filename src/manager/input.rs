//! Input routing: hit-testing, bubbling, hover, capture, and the host
//! adapter.

use tracing::{debug, warn};

use crate::control::{ControlBehavior, ControlId, MouseFilterMode};
use crate::event::{
    BoundKeyEvent, BoundKeyFunction, GuiBoundKeyEvent, GuiKeyEvent, GuiMouseMoveEvent,
    GuiMouseWheelEvent, GuiTextEvent, InputEvent, KeyEvent, KeyState, MouseButtonEvent,
    MouseMoveEvent, MouseWheelEvent, RoutedEvent, TextEvent, UiEventKind,
};
use crate::geometry::{PixelRect, Vec2};
use crate::widgets::BaseControl;

use super::UiManager;

impl UiManager {
    // ── Hit testing ──────────────────────────────────────────────────

    /// Topmost control accepting the mouse at `position` (screen pixels).
    pub fn mouse_get_control(&self, position: Vec2) -> Option<ControlId> {
        self.find_control_at(self.root(), position)
    }

    /// `position` is relative to `id`'s parent-space origin, in pixels.
    fn find_control_at(&self, id: ControlId, position: Vec2) -> Option<ControlId> {
        for &child in self.tree.children(id).iter().rev() {
            let Some(data) = self.tree.get(child) else {
                continue;
            };
            if !data.visible {
                continue;
            }
            let pixel_position = self.to_pixels(data.position);
            if data.rect_clip_content {
                let rect = PixelRect::from_dimensions(pixel_position, self.to_pixels(data.size));
                if !rect.contains(position.round()) {
                    continue;
                }
            }
            if let Some(found) = self.find_control_at(child, position - pixel_position.to_vec2()) {
                return Some(found);
            }
        }

        let data = self.tree.get(id)?;
        (data.mouse_filter != MouseFilterMode::Ignore
            && self.control_has_point(id, position / self.ui_scale()))
        .then_some(id)
    }

    /// Local hit test in logical units.
    fn control_has_point(&self, id: ControlId, point: Vec2) -> bool {
        let Some(data) = self.tree.get(id) else {
            return false;
        };
        match self.tree.behavior(id) {
            Some(behavior) => behavior.has_point(data, point),
            None => BaseControl.has_point(data, point),
        }
    }

    // ── Bubbling ─────────────────────────────────────────────────────

    /// Deliver `event` to `start` and then its ancestors.
    ///
    /// Ignore controls are skipped. Propagation stops once the event is
    /// handled, or at a Stop control unless `ignore_stop` is set. Relative
    /// positions are shifted into each parent's space on the way up.
    fn bubble<E: RoutedEvent>(
        &mut self,
        start: ControlId,
        event: &mut E,
        ignore_stop: bool,
        mut dispatch: impl FnMut(&mut dyn ControlBehavior, &mut UiManager, ControlId, &mut E),
    ) {
        let mut current = Some(start);
        while let Some(id) = current {
            let Some(filter) = self.tree.get(id).map(|d| d.mouse_filter) else {
                break;
            };
            if filter != MouseFilterMode::Ignore {
                event.set_source(id);
                self.with_behavior(id, |behavior, ui| dispatch(behavior, ui, id, event));
                if event.is_handled() || (!ignore_stop && filter == MouseFilterMode::Stop) {
                    break;
                }
            }
            // The handler may have disposed or moved the control.
            let Some(data) = self.tree.get(id) else {
                break;
            };
            let position = data.position;
            event.offset_by(position, self.to_pixels(position));
            current = self.tree.parent(id);
        }
    }

    /// Pointer position relative to `id`, logical and pixel.
    fn relative_to(&self, id: ControlId, pointer: Vec2) -> (Vec2, Vec2) {
        let global = self.global_position(id).unwrap_or(Vec2::ZERO);
        let global_pixel = self.global_pixel_position(id).unwrap_or_default().to_vec2();
        (pointer / self.ui_scale() - global, pointer - global_pixel)
    }

    // ── Bound keys ───────────────────────────────────────────────────

    /// Route a bound-key press. Returns whether the input was consumed.
    ///
    /// A focusing press outside the topmost modal dismisses that modal, is
    /// not dispatched further and is reported as not consumed. Otherwise it releases keyboard focus,
    /// captures the pressed control, and grants it focus if it asks for
    /// focus on click.
    pub fn key_bind_down(&mut self, args: BoundKeyEvent) -> bool {
        let mut control = self.mouse_get_control(args.pointer_location);

        if args.can_focus {
            if let Some(&top) = self.modal_stack.last() {
                let origin = self.global_pixel_position(top).unwrap_or_default().to_vec2();
                let local = (args.pointer_location - origin) / self.ui_scale();
                if !self.control_has_point(top, local) {
                    debug!(modal = ?top, "press outside modal, dismissing");
                    self.remove_modal(top);
                    return false;
                }
            }

            self.release_keyboard_focus();
            let Some(target) = control else {
                return false;
            };
            self.control_focused = Some(target);
            let wants_focus = self
                .tree
                .get(target)
                .is_some_and(|d| d.can_keyboard_focus && d.keyboard_focus_on_click);
            if wants_focus {
                if let Err(error) = self.grab_keyboard_focus(target) {
                    warn!(%error, "focus on click refused");
                }
            }
        } else if let Some(focused) = self.keyboard_focused {
            control = Some(focused);
        }

        let Some(target) = control else {
            return false;
        };
        let (relative, relative_pixel) = self.relative_to(target, args.pointer_location);
        let mut event = GuiBoundKeyEvent::new(
            args.function,
            args.state,
            args.pointer_location,
            args.can_focus,
            relative,
            relative_pixel,
        );
        self.bubble(target, &mut event, false, |behavior, ui, id, e| {
            behavior.key_bind_down(ui, id, e)
        });
        args.can_focus || event.is_handled()
    }

    /// Route a bound-key release to the capturing control, else the focused
    /// control, else whatever is under the pointer. Always consumed; clears
    /// the capture.
    pub fn key_bind_up(&mut self, args: BoundKeyEvent) -> bool {
        let target = self
            .control_focused
            .or(self.keyboard_focused)
            .filter(|&id| self.tree.contains(id))
            .or_else(|| self.mouse_get_control(args.pointer_location));

        if let Some(target) = target {
            let (relative, relative_pixel) = self.relative_to(target, args.pointer_location);
            let mut event = GuiBoundKeyEvent::new(
                args.function,
                args.state,
                args.pointer_location,
                args.can_focus,
                relative,
                relative_pixel,
            );
            self.bubble(target, &mut event, false, |behavior, ui, id, e| {
                behavior.key_bind_up(ui, id, e)
            });
        }

        self.control_focused = None;
        true
    }

    // ── Mouse ────────────────────────────────────────────────────────

    pub fn mouse_button_down(&mut self, args: MouseButtonEvent) -> bool {
        let function = BoundKeyFunction::for_mouse_button(args.button);
        self.key_bind_down(BoundKeyEvent::new(function, KeyState::Down, args.position, true))
    }

    pub fn mouse_button_up(&mut self, args: MouseButtonEvent) -> bool {
        let function = BoundKeyFunction::for_mouse_button(args.button);
        self.key_bind_up(BoundKeyEvent::new(function, KeyState::Up, args.position, true))
    }

    /// Update hover state, then deliver the move to the capturing control
    /// or the hovered one.
    pub fn mouse_move(&mut self, args: MouseMoveEvent) {
        self.last_pointer = args.position;
        let hovered = self.mouse_get_control(args.position);
        if hovered != self.currently_hovered {
            if let Some(old) = self.currently_hovered.take() {
                self.fire(old, UiEventKind::MouseExited);
            }
            self.currently_hovered = hovered;
            if let Some(new) = hovered {
                self.fire(new, UiEventKind::MouseEntered);
            }
        }

        let Some(target) = self.control_focused.or(hovered) else {
            return;
        };
        let (relative, relative_pixel) = self.relative_to(target, args.position);
        let scale = self.ui_scale();
        let mut event = GuiMouseMoveEvent::new(
            args.relative / scale,
            target,
            args.position / scale,
            args.position,
            relative,
            relative_pixel,
        );
        self.bubble(target, &mut event, false, |behavior, ui, id, e| {
            behavior.mouse_move(ui, id, e)
        });
    }

    /// Deliver a wheel event. Bubbles through Stop controls until handled.
    pub fn mouse_wheel(&mut self, args: MouseWheelEvent) -> bool {
        let Some(target) = self.mouse_get_control(args.position) else {
            return false;
        };
        let (relative, relative_pixel) = self.relative_to(target, args.position);
        let scale = self.ui_scale();
        let mut event = GuiMouseWheelEvent::new(
            args.delta,
            target,
            args.position / scale,
            args.position,
            relative,
            relative_pixel,
        );
        self.bubble(target, &mut event, true, |behavior, ui, id, e| {
            behavior.mouse_wheel(ui, id, e)
        });
        true
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    /// Raw key press for the focused control. Unhandled presses that map to
    /// a bound function are routed as non-focusing bound-key presses.
    pub fn key_down(&mut self, args: KeyEvent) -> bool {
        if self.deliver_key(args, true) {
            return true;
        }
        match self.bindings().resolve(&args) {
            Some(function) => self.key_bind_down(BoundKeyEvent::new(
                function,
                KeyState::Down,
                args.pointer_location,
                false,
            )),
            None => false,
        }
    }

    pub fn key_up(&mut self, args: KeyEvent) -> bool {
        if self.deliver_key(args, false) {
            return true;
        }
        match self.bindings().resolve(&args) {
            Some(function) => self.key_bind_up(BoundKeyEvent::new(
                function,
                KeyState::Up,
                args.pointer_location,
                false,
            )),
            None => false,
        }
    }

    fn deliver_key(&mut self, args: KeyEvent, down: bool) -> bool {
        let Some(focused) = self.keyboard_focused else {
            return false;
        };
        let mut event = GuiKeyEvent::new(args.code, args.modifiers, args.state, args.is_repeat);
        self.with_behavior(focused, |behavior, ui| {
            if down {
                behavior.key_down(ui, focused, &mut event);
            } else {
                behavior.key_up(ui, focused, &mut event);
            }
        });
        event.is_handled()
    }

    /// Text input goes to the keyboard-focused control only.
    pub fn text_entered(&mut self, args: TextEvent) -> bool {
        let Some(focused) = self.keyboard_focused else {
            return false;
        };
        let mut event = GuiTextEvent::new(focused, args.code_point);
        self.with_behavior(focused, |behavior, ui| behavior.text_entered(ui, focused, &mut event));
        event.is_handled()
    }

    // ── Host adapter ─────────────────────────────────────────────────

    /// Dispatch one host input event. Returns whether it was consumed.
    pub fn handle_input(&mut self, event: InputEvent) -> crate::UiResult<bool> {
        Ok(match event {
            InputEvent::Key(key) => match key.state {
                KeyState::Down => self.key_down(key),
                KeyState::Up => self.key_up(key),
            },
            InputEvent::MouseButton(button) => match button.state {
                KeyState::Down => self.mouse_button_down(button),
                KeyState::Up => self.mouse_button_up(button),
            },
            InputEvent::MouseMove { position } => {
                let relative = position - self.last_pointer;
                self.mouse_move(MouseMoveEvent { relative, position });
                true
            }
            InputEvent::MouseWheel(wheel) => self.mouse_wheel(wheel),
            InputEvent::Text(text) => self.text_entered(text),
            InputEvent::Paste(text) => text
                .chars()
                .fold(false, |any, code_point| self.text_entered(TextEvent { code_point }) || any),
            InputEvent::Resize { width, height } => {
                self.set_screen_size(Vec2::new(f32::from(width), f32::from(height)))?;
                true
            }
            InputEvent::FocusGained | InputEvent::FocusLost => false,
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

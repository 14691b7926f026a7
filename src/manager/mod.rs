//! The UI manager: owns the control tree and drives every frame phase.
//!
//! [`UiManager`] ties together the control arena, the stylesheet, the
//! deferred style and layout queues, input routing, and the keyboard focus,
//! hover, capture and modal state.
//!
//! Frame order: input dispatch, [`update`](UiManager::update),
//! [`frame_update`](UiManager::frame_update) (style drain, then layout
//! drain), then [`render`](UiManager::render).

mod focus;
mod input;
mod style;
mod tree_ops;

use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::config::UiConfig;
use crate::control::{ControlBehavior, ControlId, ControlTree, LayoutPreset, MouseFilterMode};
use crate::error::{UiError, UiResult};
use crate::event::{EventQueue, KeyBindingRegistry, UiEvent, UiEventKind};
use crate::geometry::{Point, Vec2};
use crate::style::{Stylesheet, Theme};
use crate::widgets::LayoutContainer;

/// Owner of the control tree and all per-frame UI state.
pub struct UiManager {
    pub(crate) tree: ControlTree,
    stylesheet: Option<Rc<Stylesheet>>,
    theme: Theme,
    pub(crate) style_queue: VecDeque<ControlId>,
    pub(crate) layout_queue: VecDeque<ControlId>,
    pub(crate) modal_stack: Vec<ControlId>,
    pub(crate) keyboard_focused: Option<ControlId>,
    /// Control that received the last focusing button-down; receives the
    /// matching button-up and all moves.
    pub(crate) control_focused: Option<ControlId>,
    pub(crate) currently_hovered: Option<ControlId>,
    ui_scale: f32,
    screen_size: Vec2,
    rendering: bool,
    pub(crate) events: EventQueue,
    /// Hooks fired at a control while its own behavior was checked out,
    /// delivered once the behavior is restored.
    deferred_hooks: Vec<(ControlId, UiEventKind)>,
    bindings: KeyBindingRegistry,
    pub(crate) last_pointer: Vec2,
    root: ControlId,
    state_root: ControlId,
    window_root: ControlId,
    popup_root: ControlId,
    modal_root: ControlId,
}

fn check_scale(scale: f32) -> UiResult<f32> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(UiError::InvalidArgument(format!("ui scale must be positive, got {scale}")))
    }
}

impl UiManager {
    /// Build a manager and its fixed root layering.
    pub fn new(config: UiConfig) -> UiResult<Self> {
        let ui_scale = check_scale(config.ui_scale)?;
        let stylesheet = match &config.stylesheet {
            Some(source) => Some(Rc::new(Stylesheet::parse(source)?)),
            None => None,
        };

        let mut manager = Self {
            tree: ControlTree::new(),
            stylesheet,
            theme: config.theme,
            style_queue: VecDeque::new(),
            layout_queue: VecDeque::new(),
            modal_stack: Vec::new(),
            keyboard_focused: None,
            control_focused: None,
            currently_hovered: None,
            ui_scale,
            screen_size: config.screen_size,
            rendering: true,
            events: EventQueue::new(),
            deferred_hooks: Vec::new(),
            bindings: KeyBindingRegistry::with_defaults(),
            last_pointer: Vec2::ZERO,
            root: ControlId::default(),
            state_root: ControlId::default(),
            window_root: ControlId::default(),
            popup_root: ControlId::default(),
            modal_root: ControlId::default(),
        };
        manager.init_roots()?;
        Ok(manager)
    }

    /// A 1280×720 manager at scale 1.0 with the default theme.
    pub fn new_testing() -> Self {
        match Self::new(UiConfig::default()) {
            Ok(manager) => manager,
            Err(err) => unreachable!("default configuration is valid: {err}"),
        }
    }

    fn init_roots(&mut self) -> UiResult<()> {
        let root = self.create_named("UIRoot", LayoutContainer)?;
        self.set_mouse_filter(root, MouseFilterMode::Ignore)?;
        self.tree.set_root(root);
        self.root = root;

        let mut layers = [ControlId::default(); 4];
        for (slot, name) in layers
            .iter_mut()
            .zip(["StateRoot", "WindowRoot", "PopupRoot", "ModalRoot"])
        {
            let layer = self.create_named(name, LayoutContainer)?;
            self.set_mouse_filter(layer, MouseFilterMode::Ignore)?;
            self.set_anchor_and_margin_preset(layer, LayoutPreset::Wide)?;
            self.add_child(root, layer)?;
            *slot = layer;
        }
        [self.state_root, self.window_root, self.popup_root, self.modal_root] = layers;

        self.enter_tree(root);
        self.set_size(root, self.screen_size / self.ui_scale)?;
        self.frame_update(0.0)?;
        self.events.drain();
        Ok(())
    }

    /// Dispose the whole tree. The manager is unusable afterwards.
    pub fn teardown(&mut self) -> UiResult<()> {
        self.dispose(self.root)?;
        self.style_queue.clear();
        self.layout_queue.clear();
        self.modal_stack.clear();
        Ok(())
    }

    // ── Roots ────────────────────────────────────────────────────────

    pub fn root(&self) -> ControlId {
        self.root
    }

    pub fn state_root(&self) -> ControlId {
        self.state_root
    }

    pub fn window_root(&self) -> ControlId {
        self.window_root
    }

    pub fn popup_root(&self) -> ControlId {
        self.popup_root
    }

    pub fn modal_root(&self) -> ControlId {
        self.modal_root
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    // ── Frame phases ─────────────────────────────────────────────────

    /// Per-frame logic update, parents before children.
    pub fn update(&mut self, dt: f32) {
        for id in self.tree.walk_depth_first(self.root) {
            self.with_behavior(id, |behavior, ui| behavior.update(ui, id, dt));
        }
    }

    /// Per-frame update hooks, then the style queue, then the layout queue.
    pub fn frame_update(&mut self, dt: f32) -> UiResult<()> {
        for id in self.tree.walk_depth_first(self.root) {
            self.with_behavior(id, |behavior, ui| behavior.frame_update(ui, id, dt));
        }
        self.drain_style_queue();
        self.drain_layout_queue()
    }

    // ── Scale and screen ─────────────────────────────────────────────

    pub fn ui_scale(&self) -> f32 {
        self.ui_scale
    }

    /// Change the UI scale. Logical geometry is unchanged; pixel geometry
    /// follows.
    pub fn set_ui_scale(&mut self, scale: f32) -> UiResult<()> {
        let scale = check_scale(scale)?;
        if scale == self.ui_scale {
            return Ok(());
        }
        debug!(old = self.ui_scale, new = scale, "ui scale changed");
        self.ui_scale = scale;
        self.set_size(self.root, self.screen_size / scale)?;
        for id in self.tree.walk_depth_first(self.root) {
            self.with_behavior(id, |behavior, ui| behavior.ui_scale_changed(ui, id));
        }
        Ok(())
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Resize the screen (pixels). The root's logical size follows.
    pub fn set_screen_size(&mut self, size: Vec2) -> UiResult<()> {
        self.screen_size = size;
        self.set_size(self.root, size / self.ui_scale)
    }

    /// Logical vector to pixels.
    pub fn to_pixels(&self, v: Vec2) -> Point {
        (v * self.ui_scale).round()
    }

    // ── Stylesheet and theme ─────────────────────────────────────────

    pub fn stylesheet(&self) -> Option<&Stylesheet> {
        self.stylesheet.as_deref()
    }

    /// Swap the stylesheet and restyle the whole tree.
    pub fn set_stylesheet(&mut self, stylesheet: Option<Stylesheet>) {
        debug!(
            rules = stylesheet.as_ref().map_or(0, Stylesheet::len),
            "stylesheet swapped"
        );
        self.stylesheet = stylesheet.map(Rc::new);
        for id in self.tree.walk_depth_first(self.root) {
            self.restyle(id);
        }
    }

    /// Parse `source` and swap it in.
    pub fn set_stylesheet_source(&mut self, source: &str) -> UiResult<()> {
        let stylesheet = Stylesheet::parse(source)?;
        self.set_stylesheet(Some(stylesheet));
        Ok(())
    }

    pub(crate) fn stylesheet_rc(&self) -> Option<Rc<Stylesheet>> {
        self.stylesheet.clone()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        for id in self.tree.walk_depth_first(self.root) {
            self.minimum_size_changed(id);
        }
    }

    // ── Rendering flag ───────────────────────────────────────────────

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    /// Enable or disable [`render`](Self::render).
    pub fn set_rendering(&mut self, rendering: bool) {
        self.rendering = rendering;
    }

    // ── Key bindings ─────────────────────────────────────────────────

    pub fn bindings(&self) -> &KeyBindingRegistry {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.bindings
    }

    // ── Notifications ────────────────────────────────────────────────

    /// Take every notification recorded since the last drain.
    ///
    /// Notifications are kept until drained; frame updates never discard
    /// them. Hosts must drain once per frame or the queue keeps growing.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.events.drain()
    }

    /// Queue a notification without invoking any hook.
    pub fn emit(&mut self, control: ControlId, kind: UiEventKind) {
        self.events.push(UiEvent::new(control, kind));
    }

    /// Invoke the hook for `kind` on `id`'s behavior, then record it.
    ///
    /// If the behavior is checked out because one of its own hooks is
    /// running, the hook is delivered right after that hook returns.
    pub(crate) fn fire(&mut self, id: ControlId, kind: UiEventKind) {
        if self.run_hook(id, kind).is_none() && self.tree.contains(id) {
            self.deferred_hooks.push((id, kind));
        }
        self.emit(id, kind);
    }

    fn run_hook(&mut self, id: ControlId, kind: UiEventKind) -> Option<()> {
        self.with_behavior(id, |behavior, ui| match kind {
            UiEventKind::EnteredTree => behavior.entered_tree(ui, id),
            UiEventKind::ExitedTree => behavior.exited_tree(ui, id),
            UiEventKind::Resized => behavior.resized(ui, id),
            UiEventKind::MouseEntered => behavior.mouse_entered(ui, id),
            UiEventKind::MouseExited => behavior.mouse_exited(ui, id),
            UiEventKind::FocusEntered => behavior.focus_entered(ui, id),
            UiEventKind::FocusExited => behavior.focus_exited(ui, id),
            UiEventKind::ModalRemoved => behavior.modal_removed(ui, id),
            UiEventKind::Disposed | UiEventKind::Pressed => {}
        })
    }

    // ── Behaviors ────────────────────────────────────────────────────

    /// Run `f` with `id`'s behavior checked out of the tree, then deliver
    /// any hooks fired at `id` meanwhile.
    ///
    /// Returns `None` if the control is gone or its behavior is already
    /// checked out further up the call stack.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: ControlId,
        f: impl FnOnce(&mut dyn ControlBehavior, &mut UiManager) -> R,
    ) -> Option<R> {
        let mut behavior = self.tree.take_behavior(id)?;
        let result = f(behavior.as_mut(), self);
        self.tree.restore_behavior(id, behavior);
        self.flush_deferred_hooks(id);
        Some(result)
    }

    /// Whether `id` exists but its behavior is checked out by a running hook.
    pub(crate) fn is_behavior_checked_out(&self, id: ControlId) -> bool {
        self.tree.contains(id) && self.tree.behavior(id).is_none()
    }

    fn flush_deferred_hooks(&mut self, id: ControlId) {
        while let Some(index) = self.deferred_hooks.iter().position(|&(c, _)| c == id) {
            let (_, kind) = self.deferred_hooks.remove(index);
            self.run_hook(id, kind);
        }
    }

    /// Downcast `id`'s behavior.
    pub fn behavior<T: ControlBehavior>(&self, id: ControlId) -> Option<&T> {
        self.tree.behavior(id)?.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: ControlBehavior>(&mut self, id: ControlId) -> Option<&mut T> {
        self.tree.behavior_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    // ── Introspection ────────────────────────────────────────────────

    pub fn style_queue_len(&self) -> usize {
        self.style_queue.len()
    }

    pub fn layout_queue_len(&self) -> usize {
        self.layout_queue.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

//! Tree structure, lifecycle, and per-control property mutation.

use tracing::trace;

use crate::control::{
    ControlBehavior, ControlData, ControlId, GrowDirection, LayoutPreset, MouseFilterMode, SizeFlags,
};
use crate::error::{UiError, UiResult};
use crate::event::UiEventKind;
use crate::geometry::{Color, PixelRect, Point, Vec2};
use crate::layout::{preset_anchors, preset_margins};

use super::UiManager;

impl UiManager {
    // ── Creation ─────────────────────────────────────────────────────

    /// Insert a detached control and run its `initialize` hook.
    pub fn create<B: ControlBehavior>(&mut self, behavior: B) -> UiResult<ControlId> {
        let data = ControlData::new(behavior.type_chain());
        let id = self.tree.insert(data, Box::new(behavior));
        self.with_behavior(id, |behavior, ui| behavior.initialize(ui, id))
            .unwrap_or(Ok(()))?;
        Ok(id)
    }

    pub fn create_named<B: ControlBehavior>(&mut self, name: &str, behavior: B) -> UiResult<ControlId> {
        let id = self.create(behavior)?;
        self.data_mut(id)?.name = Some(name.to_string());
        Ok(id)
    }

    // ── Access ───────────────────────────────────────────────────────

    pub fn data(&self, id: ControlId) -> UiResult<&ControlData> {
        self.tree.get(id).ok_or(UiError::ObjectDisposed(id))
    }

    /// Raw mutable access. Bypasses invalidation.
    pub(crate) fn data_mut(&mut self, id: ControlId) -> UiResult<&mut ControlData> {
        self.tree.get_mut(id).ok_or(UiError::ObjectDisposed(id))
    }

    pub fn is_disposed(&self, id: ControlId) -> bool {
        !self.tree.contains(id)
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.tree.parent(id)
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.tree.children(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ControlId> {
        self.tree.find_by_name(self.root(), name)
    }

    // ── Structure ────────────────────────────────────────────────────

    /// Append `child` to `parent`. The child must be detached and must not
    /// be the root or an ancestor of `parent`.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> UiResult<()> {
        let parent_inside = self.data(parent)?.inside_tree;
        self.data(child)?;
        if self.tree.parent(child).is_some() {
            return Err(UiError::InvalidOperation(format!(
                "control {child:?} already has a parent"
            )));
        }
        if self.tree.root() == Some(child) {
            return Err(UiError::InvalidOperation("the root control cannot be parented".into()));
        }
        if self.tree.is_same_or_ancestor(child, parent) {
            return Err(UiError::InvalidOperation(format!(
                "adding {child:?} under {parent:?} would create a cycle"
            )));
        }

        self.tree.attach(parent, child);
        if parent_inside {
            self.enter_tree(child);
        }
        self.minimum_size_changed(parent);
        Ok(())
    }

    /// Detach `child` from `parent`.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> UiResult<()> {
        self.data(parent)?;
        let child_inside = self.data(child)?.inside_tree;
        if self.tree.parent(child) != Some(parent) {
            return Err(UiError::InvalidOperation(format!(
                "control {child:?} is not a child of {parent:?}"
            )));
        }

        self.tree.detach(child);
        if child_inside {
            self.exit_tree(child);
        }
        self.minimum_size_changed(parent);
        Ok(())
    }

    /// Mark the subtree of `id` as inside the tree, parents first.
    pub(crate) fn enter_tree(&mut self, id: ControlId) {
        trace!(control = ?id, "subtree entered tree");
        for control in self.tree.walk_depth_first(id) {
            let Some(data) = self.tree.get_mut(control) else {
                continue;
            };
            data.inside_tree = true;
            self.fire(control, UiEventKind::EnteredTree);
            self.restyle(control);
            self.queue_layout_update(control);
        }
    }

    /// Mark the subtree of `id` as outside the tree and drop every manager
    /// reference to it.
    pub(crate) fn exit_tree(&mut self, id: ControlId) {
        trace!(control = ?id, "subtree exited tree");
        for control in self.tree.walk_depth_first(id) {
            let Some(data) = self.tree.get_mut(control) else {
                continue;
            };
            data.inside_tree = false;
            self.control_removed_from_tree(control);
            self.fire(control, UiEventKind::ExitedTree);
        }
    }

    /// Detach `id` and destroy it with its descendants, children first.
    /// Disposing an already disposed control is a no-op.
    pub fn dispose(&mut self, id: ControlId) -> UiResult<()> {
        let Some(data) = self.tree.get(id) else {
            return Ok(());
        };
        let inside = data.inside_tree;
        match self.tree.parent(id) {
            Some(parent) => self.remove_child(parent, id)?,
            None if inside => self.exit_tree(id),
            None => {}
        }

        let doomed = self.tree.walk_leaves_first(id);
        trace!(control = ?id, count = doomed.len(), "disposing");
        for &control in &doomed {
            self.control_removed_from_tree(control);
        }
        for control in doomed {
            self.tree.remove(control);
            self.emit(control, UiEventKind::Disposed);
        }
        Ok(())
    }

    /// Dispose every child of `id`.
    pub fn dispose_all_children(&mut self, id: ControlId) -> UiResult<()> {
        self.data(id)?;
        for child in self.tree.children(id).to_vec() {
            self.dispose(child)?;
        }
        Ok(())
    }

    // ── Flags ────────────────────────────────────────────────────────

    /// Show or hide `id`. Hiding releases focus, hover, capture and modal
    /// registrations held by the control or its descendants.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) -> UiResult<()> {
        let data = self.data_mut(id)?;
        if data.visible == visible {
            return Ok(());
        }
        data.visible = visible;

        if visible {
            self.queue_layout_update(id);
        } else {
            for control in self.tree.walk_depth_first(id) {
                self.control_removed_from_tree(control);
            }
        }
        if let Some(parent) = self.tree.parent(id) {
            self.minimum_size_changed(parent);
        }
        Ok(())
    }

    /// Whether `id` is inside the tree and neither it nor any ancestor is
    /// hidden.
    pub fn is_visible_in_tree(&self, id: ControlId) -> UiResult<bool> {
        let data = self.data(id)?;
        if !data.inside_tree || !data.visible {
            return Ok(false);
        }
        Ok(self
            .tree
            .ancestors(id)
            .into_iter()
            .all(|ancestor| self.tree.get(ancestor).is_some_and(|d| d.visible)))
    }

    pub fn set_mouse_filter(&mut self, id: ControlId, filter: MouseFilterMode) -> UiResult<()> {
        self.data_mut(id)?.mouse_filter = filter;
        Ok(())
    }

    pub fn set_clip_content(&mut self, id: ControlId, clip: bool) -> UiResult<()> {
        self.data_mut(id)?.rect_clip_content = clip;
        Ok(())
    }

    /// Extra pixels considered when culling against the scissor.
    pub fn set_draw_clip_margin(&mut self, id: ControlId, margin: i32) -> UiResult<()> {
        self.data_mut(id)?.rect_draw_clip_margin = margin;
        Ok(())
    }

    /// Modulate inherited by the whole subtree.
    pub fn set_modulate(&mut self, id: ControlId, color: Color) -> UiResult<()> {
        self.data_mut(id)?.modulate = color;
        Ok(())
    }

    /// Modulate for this control only. A `modulate-self` style property
    /// takes precedence.
    pub fn set_modulate_self(&mut self, id: ControlId, color: Color) -> UiResult<()> {
        self.data_mut(id)?.modulate_self = color;
        Ok(())
    }

    /// Whether the control may hold keyboard focus. Revoking it releases
    /// focus if held.
    pub fn set_can_keyboard_focus(&mut self, id: ControlId, can_focus: bool) -> UiResult<()> {
        self.data_mut(id)?.can_keyboard_focus = can_focus;
        if !can_focus {
            self.release_keyboard_focus_if(id);
        }
        Ok(())
    }

    pub fn set_keyboard_focus_on_click(&mut self, id: ControlId, on_click: bool) -> UiResult<()> {
        self.data_mut(id)?.keyboard_focus_on_click = on_click;
        Ok(())
    }

    // ── Geometry ─────────────────────────────────────────────────────

    pub fn set_position(&mut self, id: ControlId, position: Vec2) -> UiResult<()> {
        self.data_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_size(&mut self, id: ControlId, size: Vec2) -> UiResult<()> {
        let data = self.data_mut(id)?;
        if data.size == size {
            return Ok(());
        }
        data.size = size;
        self.fire(id, UiEventKind::Resized);
        self.queue_layout_update(id);
        Ok(())
    }

    /// Margins `[left, top, right, bottom]`.
    pub fn set_margins(&mut self, id: ControlId, margins: [f32; 4]) -> UiResult<()> {
        let data = self.data_mut(id)?;
        [data.margin_left, data.margin_top, data.margin_right, data.margin_bottom] = margins;
        self.parent_layout_changed(id);
        Ok(())
    }

    /// Anchors `[left, top, right, bottom]`, fractions of the parent size.
    pub fn set_anchors(&mut self, id: ControlId, anchors: [f32; 4]) -> UiResult<()> {
        let data = self.data_mut(id)?;
        [data.anchor_left, data.anchor_top, data.anchor_right, data.anchor_bottom] = anchors;
        self.parent_layout_changed(id);
        Ok(())
    }

    pub fn set_grow(&mut self, id: ControlId, horizontal: GrowDirection, vertical: GrowDirection) -> UiResult<()> {
        let data = self.data_mut(id)?;
        data.grow_horizontal = horizontal;
        data.grow_vertical = vertical;
        self.parent_layout_changed(id);
        Ok(())
    }

    /// Apply a preset's anchors, keeping margins.
    pub fn set_anchor_preset(&mut self, id: ControlId, preset: LayoutPreset) -> UiResult<()> {
        self.set_anchors(id, preset_anchors(preset))
    }

    /// Apply a preset's anchors and margins for the control's current size.
    pub fn set_anchor_and_margin_preset(&mut self, id: ControlId, preset: LayoutPreset) -> UiResult<()> {
        let size = self.data(id)?.size;
        self.set_anchors(id, preset_anchors(preset))?;
        self.set_margins(id, preset_margins(preset, size))
    }

    pub fn set_custom_minimum_size(&mut self, id: ControlId, size: Vec2) -> UiResult<()> {
        let data = self.data_mut(id)?;
        if data.custom_minimum_size == size {
            return Ok(());
        }
        data.custom_minimum_size = size;
        self.minimum_size_changed(id);
        Ok(())
    }

    pub fn set_size_flags_horizontal(&mut self, id: ControlId, flags: SizeFlags) -> UiResult<()> {
        self.data_mut(id)?.size_flags_horizontal = flags;
        self.parent_layout_changed(id);
        Ok(())
    }

    pub fn set_size_flags_vertical(&mut self, id: ControlId, flags: SizeFlags) -> UiResult<()> {
        self.data_mut(id)?.size_flags_vertical = flags;
        self.parent_layout_changed(id);
        Ok(())
    }

    pub fn set_size_flags_stretch_ratio(&mut self, id: ControlId, ratio: f32) -> UiResult<()> {
        if !(ratio.is_finite() && ratio >= 0.0) {
            return Err(UiError::InvalidArgument(format!(
                "stretch ratio must be non-negative, got {ratio}"
            )));
        }
        self.data_mut(id)?.size_flags_stretch_ratio = ratio;
        self.parent_layout_changed(id);
        Ok(())
    }

    fn parent_layout_changed(&mut self, id: ControlId) {
        if let Some(parent) = self.tree.parent(id) {
            self.queue_layout_update(parent);
        }
    }

    // ── Derived geometry ─────────────────────────────────────────────

    /// Position relative to the parent, in pixels.
    pub fn pixel_position(&self, id: ControlId) -> UiResult<Point> {
        Ok(self.to_pixels(self.data(id)?.position))
    }

    pub fn pixel_size(&self, id: ControlId) -> UiResult<Point> {
        Ok(self.to_pixels(self.data(id)?.size))
    }

    /// Pixel box relative to the parent.
    pub fn pixel_rect(&self, id: ControlId) -> UiResult<PixelRect> {
        Ok(PixelRect::from_dimensions(self.pixel_position(id)?, self.pixel_size(id)?))
    }

    /// Logical position relative to the root.
    pub fn global_position(&self, id: ControlId) -> UiResult<Vec2> {
        let mut position = self.data(id)?.position;
        for ancestor in self.tree.ancestors(id) {
            position += self.data(ancestor)?.position;
        }
        Ok(position)
    }

    /// Pixel position relative to the root: the sum of pixel positions
    /// along the ancestor chain.
    pub fn global_pixel_position(&self, id: ControlId) -> UiResult<Point> {
        let mut position = self.pixel_position(id)?;
        for ancestor in self.tree.ancestors(id) {
            position = position + self.pixel_position(ancestor)?;
        }
        Ok(position)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

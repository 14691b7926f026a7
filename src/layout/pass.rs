//! Minimum-size and arrangement passes.
//!
//! Invalidation only flags controls and queues them; the work happens when
//! the manager drains its layout queue once per frame, or synchronously via
//! [`UiManager::force_run_layout_update`].

use tracing::trace;

use crate::control::ControlId;
use crate::error::UiResult;
use crate::event::UiEventKind;
use crate::geometry::{Rect, Vec2};
use crate::manager::UiManager;

/// Style property that raises a control's minimum size.
pub const MIN_SIZE_PROPERTY: &str = "min-size";

impl UiManager {
    // ── Invalidation ─────────────────────────────────────────────────

    /// Flag `id` and every ancestor as having a stale minimum size and
    /// queue each of them for arrangement.
    pub fn minimum_size_changed(&mut self, id: ControlId) {
        let mut current = Some(id);
        while let Some(control) = current {
            let Some(data) = self.tree.get_mut(control) else {
                break;
            };
            data.minimum_size_dirty = true;
            self.queue_layout_update(control);
            current = self.tree.parent(control);
        }
    }

    /// Queue `id` for arrangement. No-op outside the tree or when already
    /// queued.
    pub fn queue_layout_update(&mut self, id: ControlId) {
        let Some(data) = self.tree.get_mut(id) else {
            return;
        };
        if !data.inside_tree || data.layout_dirty {
            return;
        }
        data.layout_dirty = true;
        self.layout_queue.push_back(id);
    }

    // ── Minimum size ─────────────────────────────────────────────────

    /// Combined minimum size of `id`, recomputing stale values first.
    pub fn combined_minimum_size(&mut self, id: ControlId) -> UiResult<Vec2> {
        let data = self.data(id)?;
        if data.minimum_size_dirty {
            self.update_minimum_size(id);
        }
        Ok(self.cached_combined_minimum_size(id))
    }

    /// Combined minimum size as of the last minimum-size pass, without
    /// recomputing. Zero for unknown controls.
    pub fn cached_combined_minimum_size(&self, id: ControlId) -> Vec2 {
        self.tree
            .get(id)
            .map(|d| d.combined_minimum_size)
            .unwrap_or(Vec2::ZERO)
    }

    /// Recompute `id`'s combined minimum size, children first.
    ///
    /// A control whose behavior is checked out by one of its own running
    /// hooks cannot be measured; it and its ancestors stay dirty and are
    /// measured again on the next query. Returns whether the subtree was
    /// fully measured.
    fn update_minimum_size(&mut self, id: ControlId) -> bool {
        let mut complete = true;
        for child in self.tree.children(id).to_vec() {
            if self.tree.get(child).is_some_and(|d| d.minimum_size_dirty) {
                complete &= self.update_minimum_size(child);
            }
        }

        if self.is_behavior_checked_out(id) {
            return false;
        }
        let ui: &UiManager = self;
        let own = ui
            .tree
            .behavior(id)
            .map(|b| b.calculate_minimum_size(ui, id))
            .unwrap_or(Vec2::ZERO);
        let styled = self
            .try_get_style_property::<Vec2>(id, MIN_SIZE_PROPERTY)
            .unwrap_or(Vec2::ZERO);

        if let Some(data) = self.tree.get_mut(id) {
            data.combined_minimum_size = own
                .component_max(styled)
                .component_max(data.custom_minimum_size);
            data.minimum_size_dirty = !complete;
        }
        complete
    }

    // ── Arrangement ──────────────────────────────────────────────────

    /// Arrange the direct children of `id`.
    pub(crate) fn do_layout_update(&mut self, id: ControlId) -> UiResult<()> {
        let Some(data) = self.tree.get_mut(id) else {
            return Ok(());
        };
        data.layout_dirty = false;
        self.with_behavior(id, |behavior, ui| behavior.layout_children(ui, id))
            .unwrap_or(Ok(()))
    }

    /// Arrange the subtree of `id` immediately, parents before children.
    pub fn force_run_layout_update(&mut self, id: ControlId) -> UiResult<()> {
        self.data(id)?;
        self.do_layout_update(id)?;
        for child in self.tree.children(id).to_vec() {
            self.force_run_layout_update(child)?;
        }
        Ok(())
    }

    /// Place a child at `rect` (logical, relative to its parent).
    ///
    /// Fires `Resized` and queues the child for arrangement if its size
    /// changed.
    pub fn set_child_rect(&mut self, child: ControlId, rect: Rect) -> UiResult<()> {
        let data = self.data_mut(child)?;
        let old_size = data.size;
        data.position = rect.top_left();
        data.size = rect.size();
        if old_size != data.size {
            self.fire(child, UiEventKind::Resized);
            self.queue_layout_update(child);
        }
        Ok(())
    }

    /// Run queued arrangements until the queue is empty.
    pub(crate) fn drain_layout_queue(&mut self) -> UiResult<()> {
        let (mut processed, mut skipped) = (0usize, 0usize);
        while let Some(id) = self.layout_queue.pop_front() {
            if !self.tree.contains(id) {
                skipped += 1;
                continue;
            }
            self.do_layout_update(id)?;
            processed += 1;
        }
        if processed + skipped > 0 {
            trace!(processed, skipped, "layout queue drained");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlBehavior, LayoutPreset};
    use crate::widgets::{BaseControl, BoxContainer, LayoutContainer};

    use std::any::Any;

    /// 40×40 control that measures itself whenever it is restyled.
    #[derive(Default)]
    struct SelfMeasuring {
        seen: Vec<Vec2>,
    }

    impl ControlBehavior for SelfMeasuring {
        fn type_chain(&self) -> &'static [&'static str] {
            &["Control"]
        }

        fn calculate_minimum_size(&self, _ui: &UiManager, _id: ControlId) -> Vec2 {
            Vec2::new(40.0, 40.0)
        }

        fn style_properties_changed(&mut self, ui: &mut UiManager, id: ControlId) {
            ui.minimum_size_changed(id);
            self.seen.push(ui.combined_minimum_size(id).expect("min"));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn fixed(ui: &mut UiManager, min: Vec2) -> ControlId {
        let id = ui.create(BaseControl).expect("create");
        ui.set_custom_minimum_size(id, min).expect("min");
        id
    }

    #[test]
    fn invalidation_is_idempotent() {
        let mut ui = UiManager::new_testing();
        let c = ui.create(BaseControl).expect("create");
        ui.add_child(ui.window_root(), c).expect("add");
        ui.frame_update(0.0).expect("frame");

        assert_eq!(ui.layout_queue_len(), 0);
        ui.queue_layout_update(c);
        ui.queue_layout_update(c);
        assert_eq!(ui.layout_queue_len(), 1);

        // c is already queued; its two ancestors (window root, root) are not.
        ui.minimum_size_changed(c);
        assert_eq!(ui.layout_queue_len(), 3);
    }

    #[test]
    fn detached_controls_are_not_queued() {
        let mut ui = UiManager::new_testing();
        let c = ui.create(BaseControl).expect("create");
        ui.queue_layout_update(c);
        assert_eq!(ui.layout_queue_len(), 0);
    }

    #[test]
    fn combined_minimum_takes_component_max() {
        let mut ui = UiManager::new_testing();
        let c = fixed(&mut ui, Vec2::new(10.0, 2.0));
        assert_eq!(ui.combined_minimum_size(c).expect("min"), Vec2::new(10.0, 2.0));

        ui.set_stylesheet_source("#big { min-size: 4 30; }").expect("sheet");
        ui.set_style_identifier(c, Some("big")).expect("id");
        ui.add_child(ui.window_root(), c).expect("add");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(ui.combined_minimum_size(c).expect("min"), Vec2::new(10.0, 30.0));
    }

    #[test]
    fn self_measurement_during_own_hook_stays_dirty() {
        let mut ui = UiManager::new_testing();
        let c = ui.create(SelfMeasuring::default()).expect("create");
        ui.add_child(ui.window_root(), c).expect("add");
        ui.frame_update(0.0).expect("frame");

        let seen = &ui.behavior::<SelfMeasuring>(c).expect("behavior").seen;
        assert_eq!(seen, &vec![Vec2::ZERO]);
        let data = ui.data(c).expect("data");
        assert!(!data.minimum_size_dirty);
        assert_eq!(data.combined_minimum_size, Vec2::new(40.0, 40.0));
        assert_eq!(data.size, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn box_minimum_follows_children() {
        let mut ui = UiManager::new_testing();
        let vbox = ui.create(BoxContainer::vertical()).expect("vbox");
        let a = fixed(&mut ui, Vec2::new(10.0, 10.0));
        let b = fixed(&mut ui, Vec2::new(30.0, 5.0));
        ui.add_child(vbox, a).expect("add");
        ui.add_child(vbox, b).expect("add");
        assert_eq!(ui.combined_minimum_size(vbox).expect("min"), Vec2::new(30.0, 15.0));

        ui.set_custom_minimum_size(b, Vec2::new(30.0, 25.0)).expect("min");
        assert_eq!(ui.combined_minimum_size(vbox).expect("min"), Vec2::new(30.0, 35.0));
    }

    #[test]
    fn box_arrangement_expands_flagged_child() {
        let mut ui = UiManager::new_testing();
        let vbox = ui.create(BoxContainer::vertical()).expect("vbox");
        ui.set_anchor_and_margin_preset(vbox, LayoutPreset::TopLeft).expect("preset");
        ui.set_custom_minimum_size(vbox, Vec2::new(40.0, 100.0)).expect("min");
        let a = fixed(&mut ui, Vec2::new(0.0, 10.0));
        let b = fixed(&mut ui, Vec2::new(0.0, 20.0));
        ui.set_size_flags_vertical(b, crate::control::SizeFlags::FILL | crate::control::SizeFlags::EXPAND)
            .expect("flags");
        ui.add_child(vbox, a).expect("add");
        ui.add_child(vbox, b).expect("add");
        ui.add_child(ui.window_root(), vbox).expect("add");
        ui.frame_update(0.0).expect("frame");

        let a = ui.data(a).expect("a");
        assert_eq!((a.position, a.size), (Vec2::ZERO, Vec2::new(40.0, 10.0)));
        let b = ui.data(b).expect("b");
        assert_eq!((b.position, b.size), (Vec2::new(0.0, 10.0), Vec2::new(40.0, 90.0)));
    }

    #[test]
    fn resize_fires_once_per_change() {
        let mut ui = UiManager::new_testing();
        let container = ui.create(LayoutContainer).expect("create");
        let c = ui.create(BaseControl).expect("create");
        ui.add_child(container, c).expect("add");
        ui.drain_events();

        ui.set_child_rect(c, Rect::new(0.0, 0.0, 5.0, 5.0)).expect("rect");
        ui.set_child_rect(c, Rect::new(3.0, 3.0, 8.0, 8.0)).expect("rect");
        let resized = ui
            .drain_events()
            .into_iter()
            .filter(|e| e.kind == UiEventKind::Resized)
            .count();
        assert_eq!(resized, 1);
        assert_eq!(ui.data(c).expect("c").position, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn disposed_entries_are_skipped() {
        let mut ui = UiManager::new_testing();
        let c = ui.create(BaseControl).expect("create");
        ui.add_child(ui.window_root(), c).expect("add");
        ui.dispose(c).expect("dispose");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(ui.layout_queue_len(), 0);
    }
}

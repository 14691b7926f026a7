//! Style engine: restyle requests, the cascade, and style-state mutation.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::control::ControlId;
use crate::error::UiResult;
use crate::style::FromStyleValue;

use super::UiManager;

impl UiManager {
    // ── Requests ─────────────────────────────────────────────────────

    /// Queue `id` for a style pass. No-op outside the tree or when already
    /// queued.
    pub fn restyle(&mut self, id: ControlId) {
        let Some(data) = self.tree.get_mut(id) else {
            return;
        };
        if !data.inside_tree || data.styling_dirty {
            return;
        }
        data.styling_dirty = true;
        self.style_queue.push_back(id);
    }

    /// Restyle `id` and its descendants, whose matches may depend on it
    /// through descendant and child combinators.
    fn restyle_subtree(&mut self, id: ControlId) {
        for control in self.tree.walk_depth_first(id) {
            self.restyle(control);
        }
    }

    // ── Cascade ──────────────────────────────────────────────────────

    /// Rebuild the resolved property map of `id` from the stylesheet.
    ///
    /// Matching rules apply in descending specificity; on equal specificity
    /// the later rule goes first. The first rule to set a property wins.
    pub(crate) fn do_style_update(&mut self, id: ControlId) {
        let Some(data) = self.tree.get_mut(id) else {
            return;
        };
        data.style_properties.clear();
        data.styling_dirty = false;
        let type_chain = data.type_chain;

        if let Some(sheet) = self.stylesheet_rc() {
            let rules = sheet.rules();
            let mut matched: Vec<usize> = sheet
                .candidate_rules(type_chain)
                .into_iter()
                .filter(|&index| rules[index].selector.matches(&self.tree, id))
                .collect();
            matched.sort_by(|&a, &b| match rules[b].specificity.cmp(&rules[a].specificity) {
                Ordering::Equal => b.cmp(&a),
                other => other,
            });

            let mut resolved = HashMap::new();
            for index in matched {
                for property in &rules[index].properties {
                    resolved
                        .entry(property.name.clone())
                        .or_insert_with(|| property.value.clone());
                }
            }
            if let Some(data) = self.tree.get_mut(id) {
                data.style_properties = resolved;
            }
        }

        self.with_behavior(id, |behavior, ui| behavior.style_properties_changed(ui, id));
    }

    /// Restyle the subtree of `id` immediately, parents before children.
    pub fn force_run_style_update(&mut self, id: ControlId) -> UiResult<()> {
        self.data(id)?;
        self.do_style_update(id);
        for child in self.tree.children(id).to_vec() {
            self.force_run_style_update(child)?;
        }
        Ok(())
    }

    pub(crate) fn drain_style_queue(&mut self) {
        let (mut processed, mut skipped) = (0usize, 0usize);
        while let Some(id) = self.style_queue.pop_front() {
            if !self.tree.contains(id) {
                skipped += 1;
                continue;
            }
            self.do_style_update(id);
            processed += 1;
        }
        if processed + skipped > 0 {
            trace!(processed, skipped, "style queue drained");
        }
    }

    // ── Resolved properties ──────────────────────────────────────────

    /// Resolved value of `name` from the last style pass, if present and of
    /// type `T`. Never runs a style pass.
    pub fn try_get_style_property<T: FromStyleValue>(&self, id: ControlId, name: &str) -> Option<T> {
        self.tree
            .get(id)?
            .style_properties
            .get(name)
            .and_then(T::from_style_value)
    }

    /// Resolved value of `name`, or `default`.
    pub fn style_property_or<T: FromStyleValue>(&self, id: ControlId, name: &str, default: T) -> T {
        self.try_get_style_property(id, name).unwrap_or(default)
    }

    /// Resolved value of `name`, falling back to the theme.
    pub fn style_property_or_theme<T: FromStyleValue>(&self, id: ControlId, name: &str) -> Option<T> {
        self.try_get_style_property(id, name)
            .or_else(|| self.theme().get(name).and_then(T::from_style_value))
    }

    // ── Classes ──────────────────────────────────────────────────────

    pub fn style_classes(&self, id: ControlId) -> UiResult<&HashSet<String>> {
        Ok(&self.data(id)?.style_classes)
    }

    pub fn has_style_class(&self, id: ControlId, class: &str) -> UiResult<bool> {
        Ok(self.data(id)?.has_style_class(class))
    }

    pub fn add_style_class(&mut self, id: ControlId, class: &str) -> UiResult<()> {
        if self.data_mut(id)?.style_classes.insert(class.to_string()) {
            self.restyle_subtree(id);
        }
        Ok(())
    }

    pub fn remove_style_class(&mut self, id: ControlId, class: &str) -> UiResult<()> {
        if self.data_mut(id)?.style_classes.remove(class) {
            self.restyle_subtree(id);
        }
        Ok(())
    }

    /// Replace all classes with `class`.
    pub fn set_only_style_class(&mut self, id: ControlId, class: &str) -> UiResult<()> {
        if set_only(&mut self.data_mut(id)?.style_classes, class) {
            self.restyle_subtree(id);
        }
        Ok(())
    }

    // ── Pseudo-classes ───────────────────────────────────────────────

    pub fn style_pseudo_classes(&self, id: ControlId) -> UiResult<&HashSet<String>> {
        Ok(&self.data(id)?.style_pseudo_classes)
    }

    pub fn has_style_pseudo_class(&self, id: ControlId, class: &str) -> UiResult<bool> {
        Ok(self.data(id)?.has_style_pseudo_class(class))
    }

    pub fn add_style_pseudo_class(&mut self, id: ControlId, class: &str) -> UiResult<()> {
        if self.data_mut(id)?.style_pseudo_classes.insert(class.to_string()) {
            self.restyle_subtree(id);
        }
        Ok(())
    }

    pub fn remove_style_pseudo_class(&mut self, id: ControlId, class: &str) -> UiResult<()> {
        if self.data_mut(id)?.style_pseudo_classes.remove(class) {
            self.restyle_subtree(id);
        }
        Ok(())
    }

    /// Replace all pseudo-classes with `class`.
    pub fn set_only_style_pseudo_class(&mut self, id: ControlId, class: &str) -> UiResult<()> {
        if set_only(&mut self.data_mut(id)?.style_pseudo_classes, class) {
            self.restyle_subtree(id);
        }
        Ok(())
    }

    // ── Identifier ───────────────────────────────────────────────────

    pub fn set_style_identifier(&mut self, id: ControlId, identifier: Option<&str>) -> UiResult<()> {
        let data = self.data_mut(id)?;
        if data.style_identifier.as_deref() == identifier {
            return Ok(());
        }
        data.style_identifier = identifier.map(str::to_string);
        self.restyle_subtree(id);
        Ok(())
    }
}

/// Make `set` exactly `{value}`. Returns whether it changed.
fn set_only(set: &mut HashSet<String>, value: &str) -> bool {
    if set.len() == 1 && set.contains(value) {
        return false;
    }
    set.clear();
    set.insert(value.to_string());
    true
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Vec2};
    use crate::style::{Selector, StyleProperty, StyleRule, StyleValue, Stylesheet};
    use crate::widgets::{BaseControl, Button};

    fn attached(ui: &mut UiManager) -> ControlId {
        let c = ui.create(BaseControl).expect("create");
        ui.add_child(ui.window_root(), c).expect("add");
        ui.frame_update(0.0).expect("frame");
        c
    }

    fn number(ui: &UiManager, id: ControlId, name: &str) -> Option<f32> {
        ui.try_get_style_property(id, name)
    }

    // ── Cascade ──────────────────────────────────────────────────────

    #[test]
    fn higher_specificity_wins() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source("#ok { x: 3; } .a { x: 2; } Control { x: 1; }")
            .expect("sheet");
        let c = attached(&mut ui);
        assert_eq!(number(&ui, c, "x"), Some(1.0));

        ui.add_style_class(c, "a").expect("class");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, c, "x"), Some(2.0));

        ui.set_style_identifier(c, Some("ok")).expect("id");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, c, "x"), Some(3.0));
    }

    #[test]
    fn later_rule_wins_ties() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source(".a { x: 1; y: 1; } .b { x: 2; }").expect("sheet");
        let c = attached(&mut ui);
        ui.add_style_class(c, "a").expect("class");
        ui.add_style_class(c, "b").expect("class");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, c, "x"), Some(2.0));
        assert_eq!(number(&ui, c, "y"), Some(1.0));
    }

    #[test]
    fn typed_rules_match_ancestor_types() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source("BaseButton { x: 1; } Label { x: 9; }").expect("sheet");
        let button = ui.create(Button::new("ok")).expect("button");
        ui.add_child(ui.window_root(), button).expect("add");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, button, "x"), Some(1.0));
    }

    #[test]
    fn descendant_rules_follow_ancestor_classes() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source(".dark Control { x: 5; }").expect("sheet");
        let parent = attached(&mut ui);
        let child = ui.create(BaseControl).expect("child");
        ui.add_child(parent, child).expect("add");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, child, "x"), None);

        ui.add_style_class(parent, "dark").expect("class");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, child, "x"), Some(5.0));
    }

    #[test]
    fn stylesheet_swap_restyles_everything() {
        let mut ui = UiManager::new_testing();
        let c = attached(&mut ui);
        let sheet = Stylesheet::new(vec![StyleRule::new(
            Selector::of_type("Control"),
            vec![StyleProperty::new("modulate-self", Color::rgb(1.0, 0.0, 0.0))],
        )]);
        ui.set_stylesheet(Some(sheet));
        assert!(ui.style_queue_len() > 1);
        ui.frame_update(0.0).expect("frame");
        assert_eq!(
            ui.try_get_style_property::<Color>(c, "modulate-self"),
            Some(Color::rgb(1.0, 0.0, 0.0))
        );

        ui.set_stylesheet(None);
        ui.frame_update(0.0).expect("frame");
        assert!(ui.data(c).expect("data").style_properties().is_empty());
    }

    #[test]
    fn detached_control_is_styled_on_entering_tree() {
        let mut ui = UiManager::new_testing();
        let detached = ui.create(BaseControl).expect("create");
        ui.add_style_class(detached, "late").expect("class");
        ui.set_stylesheet_source(".late { x: 7; }").expect("sheet");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, detached, "x"), None);

        ui.add_child(ui.window_root(), detached).expect("add");
        assert!(ui.data(detached).expect("data").styling_dirty);
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, detached, "x"), Some(7.0));
    }

    #[test]
    fn mismatched_type_reads_none() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source("Control { x: true; }").expect("sheet");
        let c = attached(&mut ui);
        assert_eq!(number(&ui, c, "x"), None);
        assert_eq!(ui.try_get_style_property::<bool>(c, "x"), Some(true));
        assert_eq!(ui.style_property_or(c, "missing", 7.0_f32), 7.0);
        assert!(matches!(
            ui.style_property_or_theme::<StyleValue>(c, "panel"),
            Some(StyleValue::StyleBox(_))
        ));
    }

    #[test]
    fn reads_never_run_a_pass() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source(".a { x: 1; }").expect("sheet");
        let c = attached(&mut ui);
        ui.add_style_class(c, "a").expect("class");
        assert_eq!(number(&ui, c, "x"), None);
        ui.force_run_style_update(c).expect("force");
        assert_eq!(number(&ui, c, "x"), Some(1.0));
    }

    // ── Requests ─────────────────────────────────────────────────────

    #[test]
    fn restyle_is_idempotent() {
        let mut ui = UiManager::new_testing();
        let c = attached(&mut ui);
        ui.restyle(c);
        ui.restyle(c);
        ui.add_style_class(c, "a").expect("class");
        assert_eq!(ui.style_queue_len(), 1);
    }

    #[test]
    fn unchanged_membership_does_not_restyle() {
        let mut ui = UiManager::new_testing();
        let c = attached(&mut ui);
        ui.add_style_class(c, "a").expect("class");
        ui.frame_update(0.0).expect("frame");

        ui.add_style_class(c, "a").expect("class");
        ui.remove_style_class(c, "zzz").expect("class");
        ui.set_only_style_class(c, "a").expect("class");
        ui.remove_style_pseudo_class(c, "hover").expect("pseudo");
        ui.set_style_identifier(c, None).expect("id");
        assert_eq!(ui.style_queue_len(), 0);
    }

    #[test]
    fn set_only_style_class_round_trip() {
        let mut ui = UiManager::new_testing();
        let c = attached(&mut ui);
        ui.add_style_class(c, "a").expect("class");
        ui.add_style_class(c, "b").expect("class");
        ui.set_only_style_class(c, "x").expect("class");
        assert!(ui.has_style_class(c, "x").expect("has"));
        let expected: HashSet<String> = ["x".to_string()].into_iter().collect();
        assert_eq!(ui.style_classes(c).expect("classes"), &expected);
    }

    #[test]
    fn pseudo_classes() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source(":hover { x: 1; }").expect("sheet");
        let c = attached(&mut ui);
        ui.set_only_style_pseudo_class(c, "hover").expect("pseudo");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(number(&ui, c, "x"), Some(1.0));

        ui.set_only_style_pseudo_class(c, "pressed").expect("pseudo");
        ui.frame_update(0.0).expect("frame");
        assert!(!ui.has_style_pseudo_class(c, "hover").expect("has"));
        assert_eq!(number(&ui, c, "x"), None);
    }

    #[test]
    fn style_pass_invalidates_minimum_size() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source(".big { min-size: 50 8; }").expect("sheet");
        let c = attached(&mut ui);
        ui.add_style_class(c, "big").expect("class");
        ui.frame_update(0.0).expect("frame");
        assert_eq!(ui.combined_minimum_size(c).expect("min"), Vec2::new(50.0, 8.0));
        assert_eq!(ui.data(c).expect("data").size, Vec2::new(50.0, 8.0));
    }
}

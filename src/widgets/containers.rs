//! Containers: controls whose main job is arranging their children.

use std::any::Any;
use std::rc::Rc;

use crate::control::{ControlBehavior, ControlId};
use crate::error::UiResult;
use crate::geometry::{PixelRect, Point, Rect, Vec2};
use crate::layout::{anchor_rect, arrange_box, box_minimum_size, BoxAxis, BoxChild};
use crate::manager::UiManager;
use crate::render::DrawingHandle;
use crate::style::StyleBox;

/// Gap between box children, in logical units.
pub const SEPARATION_PROPERTY: &str = "separation";

/// Background and content margins of a [`PanelContainer`].
pub const PANEL_PROPERTY: &str = "panel";

fn visible_children(ui: &UiManager, id: ControlId) -> Vec<ControlId> {
    ui.children(id)
        .iter()
        .copied()
        .filter(|&c| ui.data(c).is_ok_and(|d| d.visible))
        .collect()
}

// ---------------------------------------------------------------------------
// LayoutContainer
// ---------------------------------------------------------------------------

/// Places each child by its anchors and margins.
///
/// Imposes no minimum size of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutContainer;

impl LayoutContainer {
    pub const TYPE_CHAIN: &'static [&'static str] = &["LayoutContainer", "Container", "Control"];
}

impl ControlBehavior for LayoutContainer {
    fn type_chain(&self) -> &'static [&'static str] {
        Self::TYPE_CHAIN
    }

    fn layout_children(&mut self, ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        let size = ui.data(id)?.size;
        for child in ui.children(id).to_vec() {
            let minimum = ui.combined_minimum_size(child)?;
            let rect = anchor_rect(ui.data(child)?, size, minimum);
            ui.set_child_rect(child, rect)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// BoxContainer
// ---------------------------------------------------------------------------

/// Stacks visible children along one axis.
///
/// Children get their minimum size along the axis; those flagged `EXPAND`
/// split the leftover in proportion to their stretch ratios. The
/// `separation` style property sets the gap.
#[derive(Debug, Clone, Copy)]
pub struct BoxContainer {
    axis: BoxAxis,
}

impl BoxContainer {
    pub const VERTICAL_TYPE_CHAIN: &'static [&'static str] =
        &["VBoxContainer", "BoxContainer", "Container", "Control"];
    pub const HORIZONTAL_TYPE_CHAIN: &'static [&'static str] =
        &["HBoxContainer", "BoxContainer", "Container", "Control"];

    pub fn vertical() -> Self {
        Self { axis: BoxAxis::Vertical }
    }

    pub fn horizontal() -> Self {
        Self { axis: BoxAxis::Horizontal }
    }

    pub fn axis(&self) -> BoxAxis {
        self.axis
    }

    fn separation(ui: &UiManager, id: ControlId) -> f32 {
        ui.style_property_or_theme::<f32>(id, SEPARATION_PROPERTY)
            .unwrap_or(0.0)
    }
}

impl ControlBehavior for BoxContainer {
    fn type_chain(&self) -> &'static [&'static str] {
        match self.axis {
            BoxAxis::Vertical => Self::VERTICAL_TYPE_CHAIN,
            BoxAxis::Horizontal => Self::HORIZONTAL_TYPE_CHAIN,
        }
    }

    fn calculate_minimum_size(&self, ui: &UiManager, id: ControlId) -> Vec2 {
        let minimums: Vec<Vec2> = visible_children(ui, id)
            .into_iter()
            .map(|c| ui.cached_combined_minimum_size(c))
            .collect();
        box_minimum_size(self.axis, Self::separation(ui, id), &minimums)
    }

    fn layout_children(&mut self, ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        let size = ui.data(id)?.size;
        let separation = Self::separation(ui, id);
        let children = visible_children(ui, id);

        let mut inputs = Vec::with_capacity(children.len());
        for &child in &children {
            let minimum_size = ui.combined_minimum_size(child)?;
            let data = ui.data(child)?;
            inputs.push(BoxChild {
                minimum_size,
                size_flags_horizontal: data.size_flags_horizontal,
                size_flags_vertical: data.size_flags_vertical,
                stretch_ratio: data.size_flags_stretch_ratio,
            });
        }

        let rects = arrange_box(self.axis, size, separation, &inputs)?;
        for (child, rect) in children.into_iter().zip(rects) {
            ui.set_child_rect(child, rect)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// PanelContainer
// ---------------------------------------------------------------------------

/// Draws a `panel` style box and fits every visible child into its content
/// area.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelContainer;

impl PanelContainer {
    pub const TYPE_CHAIN: &'static [&'static str] = &["PanelContainer", "Container", "Control"];

    fn panel(ui: &UiManager, id: ControlId) -> Option<Rc<StyleBox>> {
        ui.style_property_or_theme::<Rc<StyleBox>>(id, PANEL_PROPERTY)
    }
}

impl ControlBehavior for PanelContainer {
    fn type_chain(&self) -> &'static [&'static str] {
        Self::TYPE_CHAIN
    }

    fn calculate_minimum_size(&self, ui: &UiManager, id: ControlId) -> Vec2 {
        let content = visible_children(ui, id)
            .into_iter()
            .map(|c| ui.cached_combined_minimum_size(c))
            .fold(Vec2::ZERO, Vec2::component_max);
        let chrome = Self::panel(ui, id)
            .map(|panel| panel.minimum_size())
            .unwrap_or(Vec2::ZERO);
        content + chrome
    }

    fn layout_children(&mut self, ui: &mut UiManager, id: ControlId) -> UiResult<()> {
        let size = ui.data(id)?.size;
        let content = match Self::panel(ui, id) {
            Some(panel) => Rect::new(
                panel.content_margin_left,
                panel.content_margin_top,
                size.x - panel.content_margin_right,
                size.y - panel.content_margin_bottom,
            ),
            None => Rect::from_dimensions(Vec2::ZERO, size),
        };
        for child in visible_children(ui, id) {
            ui.set_child_rect(child, content)?;
        }
        Ok(())
    }

    fn draw(&self, ui: &UiManager, id: ControlId, handle: &mut dyn DrawingHandle) {
        let (Some(panel), Ok(size)) = (Self::panel(ui, id), ui.pixel_size(id)) else {
            return;
        };
        panel.draw(handle, PixelRect::from_dimensions(Point::ZERO, size));
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
    use crate::control::{LayoutPreset, SizeFlags};
    use crate::style::Theme;
    use crate::widgets::BaseControl;
    use pretty_assertions::assert_eq;

    fn sized(ui: &mut UiManager, parent: ControlId, minimum: Vec2) -> ControlId {
        let id = ui.create(BaseControl).expect("create");
        ui.set_custom_minimum_size(id, minimum).expect("min");
        ui.add_child(parent, id).expect("add");
        id
    }

    fn rect_of(ui: &UiManager, id: ControlId) -> (Vec2, Vec2) {
        let data = ui.data(id).expect("data");
        (data.position, data.size)
    }

    // ── LayoutContainer ──────────────────────────────────────────────

    #[test]
    fn layout_container_centers_by_preset() {
        let mut ui = UiManager::new_testing();
        let child = ui.create(BaseControl).expect("create");
        ui.set_size(child, Vec2::new(100.0, 50.0)).expect("size");
        ui.set_anchor_and_margin_preset(child, LayoutPreset::Center).expect("preset");
        ui.add_child(ui.window_root(), child).expect("add");
        ui.frame_update(0.0).expect("frame");

        assert_eq!(rect_of(&ui, child), (Vec2::new(590.0, 335.0), Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn layout_container_has_no_minimum() {
        let mut ui = UiManager::new_testing();
        let container = ui.create(LayoutContainer).expect("create");
        ui.add_child(ui.window_root(), container).expect("add");
        sized(&mut ui, container, Vec2::new(300.0, 300.0));
        assert_eq!(ui.combined_minimum_size(container).expect("min"), Vec2::ZERO);
    }

    // ── BoxContainer ─────────────────────────────────────────────────

    #[test]
    fn hbox_separation_from_style() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source("HBoxContainer { separation: 5; }").expect("sheet");
        let hbox = ui.create(BoxContainer::horizontal()).expect("hbox");
        ui.set_margins(hbox, [0.0, 0.0, 100.0, 20.0]).expect("margins");
        ui.add_child(ui.window_root(), hbox).expect("add");
        let a = sized(&mut ui, hbox, Vec2::new(10.0, 5.0));
        let b = sized(&mut ui, hbox, Vec2::new(20.0, 5.0));
        ui.frame_update(0.0).expect("frame");

        assert_eq!(rect_of(&ui, a), (Vec2::ZERO, Vec2::new(10.0, 20.0)));
        assert_eq!(rect_of(&ui, b), (Vec2::new(15.0, 0.0), Vec2::new(20.0, 20.0)));
        assert_eq!(ui.combined_minimum_size(hbox).expect("min"), Vec2::new(35.0, 5.0));
    }

    #[test]
    fn box_skips_hidden_children() {
        let mut ui = UiManager::new_testing();
        let vbox = ui.create(BoxContainer::vertical()).expect("vbox");
        ui.set_margins(vbox, [0.0, 0.0, 50.0, 100.0]).expect("margins");
        ui.add_child(ui.window_root(), vbox).expect("add");
        let hidden = sized(&mut ui, vbox, Vec2::new(10.0, 30.0));
        let shown = sized(&mut ui, vbox, Vec2::new(10.0, 10.0));
        ui.set_visible(hidden, false).expect("hide");
        ui.frame_update(0.0).expect("frame");

        assert_eq!(rect_of(&ui, shown), (Vec2::ZERO, Vec2::new(50.0, 10.0)));
        assert_eq!(ui.combined_minimum_size(vbox).expect("min"), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn box_shrink_end_aligns_cross_axis() {
        let mut ui = UiManager::new_testing();
        let vbox = ui.create(BoxContainer::vertical()).expect("vbox");
        ui.set_margins(vbox, [0.0, 0.0, 50.0, 100.0]).expect("margins");
        ui.add_child(ui.window_root(), vbox).expect("add");
        let a = sized(&mut ui, vbox, Vec2::new(10.0, 10.0));
        ui.set_size_flags_horizontal(a, SizeFlags::SHRINK_END).expect("flags");
        ui.frame_update(0.0).expect("frame");

        assert_eq!(rect_of(&ui, a), (Vec2::new(40.0, 0.0), Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn box_type_chain_follows_axis() {
        assert_eq!(BoxContainer::vertical().type_chain()[0], "VBoxContainer");
        assert_eq!(BoxContainer::horizontal().type_chain()[0], "HBoxContainer");
    }

    // ── PanelContainer ───────────────────────────────────────────────

    #[test]
    fn panel_fits_children_into_content_box() {
        let mut ui = UiManager::new_testing();
        ui.set_theme(Theme::new().with("panel", StyleBox::new().with_content_margin(4.0)));
        let panel = ui.create(PanelContainer).expect("panel");
        ui.set_margins(panel, [0.0, 0.0, 60.0, 40.0]).expect("margins");
        ui.add_child(ui.window_root(), panel).expect("add");
        let child = sized(&mut ui, panel, Vec2::new(10.0, 10.0));
        ui.frame_update(0.0).expect("frame");

        assert_eq!(rect_of(&ui, child), (Vec2::new(4.0, 4.0), Vec2::new(52.0, 32.0)));
        assert_eq!(ui.combined_minimum_size(panel).expect("min"), Vec2::new(18.0, 18.0));
    }

    #[test]
    fn panel_without_stylebox_fills() {
        let mut ui = UiManager::new_testing();
        ui.set_theme(Theme::new());
        let panel = ui.create(PanelContainer).expect("panel");
        ui.set_margins(panel, [0.0, 0.0, 30.0, 30.0]).expect("margins");
        ui.add_child(ui.window_root(), panel).expect("add");
        let child = sized(&mut ui, panel, Vec2::ZERO);
        ui.frame_update(0.0).expect("frame");

        assert_eq!(rect_of(&ui, child), (Vec2::ZERO, Vec2::new(30.0, 30.0)));
    }
}

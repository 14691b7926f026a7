//! Render traversal over the control tree.

use crate::control::ControlId;
use crate::geometry::{Color, PixelRect, Point, Vec2};
use crate::manager::UiManager;

use super::handle::RenderHandle;

/// Style property overriding a control's own modulate.
pub const MODULATE_SELF_PROPERTY: &str = "modulate-self";

impl UiManager {
    /// Draw the whole tree, parents before children.
    ///
    /// No-op while rendering is disabled.
    pub fn render(&self, handle: &mut dyn RenderHandle) {
        if !self.is_rendering() {
            return;
        }
        self.render_control(handle, self.root(), Point::ZERO, Color::WHITE, None);
    }

    /// `position` is the control's absolute pixel position; `scissor` is the
    /// clip region inherited from clipping ancestors.
    fn render_control(
        &self,
        handle: &mut dyn RenderHandle,
        id: ControlId,
        position: Point,
        parent_modulate: Color,
        scissor: Option<PixelRect>,
    ) {
        let Some(data) = self.tree.get(id) else {
            return;
        };
        if !data.visible {
            return;
        }

        let control_box = PixelRect::from_dimensions(position, self.to_pixels(data.size));
        if let Some(scissor) = scissor {
            if !scissor.intersects(control_box.grown(data.rect_draw_clip_margin)) {
                return;
            }
        }

        let modulate = parent_modulate * data.modulate;
        let modulate_self = self
            .try_get_style_property::<Color>(id, MODULATE_SELF_PROPERTY)
            .unwrap_or(data.modulate_self);

        let mut region = scissor;
        if data.rect_clip_content {
            let clipped = match scissor {
                Some(scissor) => match scissor.intersection(control_box) {
                    Some(clipped) => clipped,
                    None => return,
                },
                None => control_box,
            };
            handle.set_scissor(Some(clipped));
            region = Some(clipped);
        }

        let drawing = handle.drawing_handle();
        drawing.set_transform(position.to_vec2(), Vec2::ONE);
        drawing.set_modulate(modulate * modulate_self);
        if let Some(behavior) = self.tree.behavior(id) {
            behavior.draw(self, id, drawing);
        }

        for &child in self.tree.children(id) {
            let Some(child_data) = self.tree.get(child) else {
                continue;
            };
            let child_position = position + self.to_pixels(child_data.position);
            self.render_control(handle, child, child_position, modulate, region);
        }

        if data.rect_clip_content {
            handle.set_scissor(scissor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, RecordingRenderer};
    use crate::widgets::{BaseControl, PanelContainer};
    use pretty_assertions::assert_eq;

    fn placed(ui: &mut UiManager, parent: ControlId, position: Vec2, size: Vec2) -> ControlId {
        let id = ui.create(PanelContainer).expect("panel");
        ui.set_position(id, position).expect("pos");
        ui.set_size(id, size).expect("size");
        ui.add_child(parent, id).expect("add");
        id
    }

    /// A plain control under the window root, sized by margins.
    fn host(ui: &mut UiManager, rect: [f32; 4]) -> ControlId {
        let id = ui.create(BaseControl).expect("base");
        ui.set_margins(id, rect).expect("margins");
        ui.add_child(ui.window_root(), id).expect("add");
        id
    }

    #[test]
    fn child_scissor_intersects_parent() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [0.0, 0.0, 100.0, 100.0]);
        ui.set_clip_content(parent, true).expect("clip");
        let child = placed(&mut ui, parent, Vec2::new(80.0, 80.0), Vec2::new(40.0, 40.0));
        ui.set_clip_content(child, true).expect("clip");
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert_eq!(
            renderer.scissors(),
            vec![
                Some(PixelRect::new(0, 0, 100, 100)),
                Some(PixelRect::new(80, 80, 100, 100)),
                Some(PixelRect::new(0, 0, 100, 100)),
                None,
            ]
        );
    }

    #[test]
    fn culled_outside_scissor() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [0.0, 0.0, 100.0, 100.0]);
        ui.set_clip_content(parent, true).expect("clip");
        placed(&mut ui, parent, Vec2::new(150.0, 150.0), Vec2::new(10.0, 10.0));
        placed(&mut ui, parent, Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        let drawn: Vec<_> = renderer.rects().into_iter().map(|r| r.rect).collect();
        assert_eq!(drawn, vec![PixelRect::new(0, 0, 10, 10)]);
        assert!(!renderer.drew_at(Point::new(150, 150)));
    }

    #[test]
    fn draw_clip_margin_keeps_near_controls() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [0.0, 0.0, 100.0, 100.0]);
        ui.set_clip_content(parent, true).expect("clip");
        let near = placed(&mut ui, parent, Vec2::new(105.0, 0.0), Vec2::new(10.0, 10.0));
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert!(renderer.rects().is_empty());

        ui.set_draw_clip_margin(near, 5).expect("margin");
        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert_eq!(renderer.rects().len(), 1);
    }

    #[test]
    fn clipping_control_past_the_scissor_edge_draws_nothing() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [0.0, 0.0, 100.0, 100.0]);
        ui.set_clip_content(parent, true).expect("clip");
        let near = placed(&mut ui, parent, Vec2::new(105.0, 0.0), Vec2::new(10.0, 10.0));
        ui.set_clip_content(near, true).expect("clip");
        ui.set_draw_clip_margin(near, 5).expect("margin");
        placed(&mut ui, near, Vec2::ZERO, Vec2::new(5.0, 5.0));
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert!(renderer.rects().is_empty());
        assert_eq!(
            renderer.scissors(),
            vec![Some(PixelRect::new(0, 0, 100, 100)), None]
        );
    }

    #[test]
    fn translation_and_modulate_accumulate() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [10.0, 20.0, 110.0, 120.0]);
        ui.set_modulate(parent, Color::new(0.5, 1.0, 1.0, 1.0)).expect("modulate");
        let child = placed(&mut ui, parent, Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        ui.set_modulate_self(child, Color::new(1.0, 0.5, 1.0, 1.0)).expect("modulate");
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        let rects = renderer.rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].transform, Vec2::new(15.0, 25.0));
        assert_eq!(rects[0].modulate, Color::new(0.5, 0.5, 1.0, 1.0));
    }

    #[test]
    fn modulate_self_style_overrides_field() {
        let mut ui = UiManager::new_testing();
        ui.set_stylesheet_source("PanelContainer { modulate-self: 0 0 1; }").expect("sheet");
        let parent = host(&mut ui, [0.0, 0.0, 50.0, 50.0]);
        let _panel = placed(&mut ui, parent, Vec2::ZERO, Vec2::new(10.0, 10.0));
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert_eq!(renderer.rects()[0].modulate, Color::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn hidden_subtrees_and_disabled_rendering_draw_nothing() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [0.0, 0.0, 50.0, 50.0]);
        placed(&mut ui, parent, Vec2::ZERO, Vec2::new(10.0, 10.0));
        ui.frame_update(0.0).expect("frame");

        ui.set_visible(parent, false).expect("hide");
        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert!(renderer.rects().is_empty());

        ui.set_visible(parent, true).expect("show");
        ui.set_rendering(false);
        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn render_trace_snapshot() {
        let mut ui = UiManager::new_testing();
        let parent = host(&mut ui, [0.0, 0.0, 40.0, 40.0]);
        ui.set_clip_content(parent, true).expect("clip");
        placed(&mut ui, parent, Vec2::new(30.0, 30.0), Vec2::new(20.0, 20.0));
        ui.frame_update(0.0).expect("frame");

        let mut renderer = RecordingRenderer::new();
        ui.render(&mut renderer);
        let trace: Vec<String> = renderer
            .calls()
            .iter()
            .filter(|c| !matches!(c, DrawCall::Transform { .. } | DrawCall::Modulate(_)))
            .map(ToString::to_string)
            .collect();
        insta::assert_snapshot!(trace.join("\n"), @r"
        scissor 0,0 40,40
        rect 0,0 20,20 filled
        scissor -
        ");
    }
}

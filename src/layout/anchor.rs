//! Anchor/margin arrangement.
//!
//! Each edge of a child is placed at `anchor * parent_dimension + margin`,
//! independently per edge. When the result is smaller than the child's
//! combined minimum size, the grow direction decides which edge moves.

use crate::control::{ControlData, GrowDirection, LayoutPreset};
use crate::geometry::{Rect, Vec2};

/// Anchors `(left, top, right, bottom)` for a preset.
pub fn preset_anchors(preset: LayoutPreset) -> [f32; 4] {
    match preset {
        LayoutPreset::TopLeft => [0.0, 0.0, 0.0, 0.0],
        LayoutPreset::TopRight => [1.0, 0.0, 1.0, 0.0],
        LayoutPreset::BottomLeft => [0.0, 1.0, 0.0, 1.0],
        LayoutPreset::BottomRight => [1.0, 1.0, 1.0, 1.0],
        LayoutPreset::Center => [0.5, 0.5, 0.5, 0.5],
        LayoutPreset::Wide => [0.0, 0.0, 1.0, 1.0],
    }
}

/// Margins `(left, top, right, bottom)` that keep a control of `size` at the
/// preset's attachment point.
pub fn preset_margins(preset: LayoutPreset, size: Vec2) -> [f32; 4] {
    let (w, h) = (size.x, size.y);
    match preset {
        LayoutPreset::TopLeft => [0.0, 0.0, w, h],
        LayoutPreset::TopRight => [-w, 0.0, 0.0, h],
        LayoutPreset::BottomLeft => [0.0, -h, w, 0.0],
        LayoutPreset::BottomRight => [-w, -h, 0.0, 0.0],
        LayoutPreset::Center => [-w / 2.0, -h / 2.0, w / 2.0, h / 2.0],
        LayoutPreset::Wide => [0.0, 0.0, 0.0, 0.0],
    }
}

/// Grow one axis `[begin, end]` so it spans at least `min`.
fn grow_axis(begin: f32, end: f32, min: f32, direction: GrowDirection) -> (f32, f32) {
    if end - begin >= min {
        return (begin, end);
    }
    match direction {
        GrowDirection::End => (begin, begin + min),
        GrowDirection::Begin => (end - min, end),
        GrowDirection::Both => {
            let center = (begin + end) / 2.0;
            let begin = center - min / 2.0;
            (begin, begin + min)
        }
    }
}

/// The rectangle a child occupies inside a parent of `parent_size`.
pub fn anchor_rect(data: &ControlData, parent_size: Vec2, minimum_size: Vec2) -> Rect {
    let left = data.anchor_left * parent_size.x + data.margin_left;
    let top = data.anchor_top * parent_size.y + data.margin_top;
    let right = data.anchor_right * parent_size.x + data.margin_right;
    let bottom = data.anchor_bottom * parent_size.y + data.margin_bottom;

    let (left, right) = grow_axis(left, right, minimum_size.x, data.grow_horizontal);
    let (top, bottom) = grow_axis(top, bottom, minimum_size.y, data.grow_vertical);

    Rect::new(left, top, right, bottom)
}

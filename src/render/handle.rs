//! Render backend collaborator traits.
//!
//! The host implements these over its graphics API. Coordinates passed to
//! the drawing primitives are pixels relative to the current transform.

use crate::geometry::{Color, PixelRect, Vec2};

/// Opaque handle to a host texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Drawing primitives for one control.
pub trait DrawingHandle {
    /// Origin offset and scale applied to every following primitive.
    fn set_transform(&mut self, position: Vec2, scale: Vec2);

    /// Color multiplied into every following primitive.
    fn set_modulate(&mut self, modulate: Color);

    fn draw_rect(&mut self, rect: PixelRect, color: Color, filled: bool);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn draw_string(&mut self, position: Vec2, text: &str, color: Color);

    fn draw_texture_rect(&mut self, texture: TextureId, rect: PixelRect, modulate: Option<Color>);
}

/// Per-frame render target.
pub trait RenderHandle {
    fn drawing_handle(&mut self) -> &mut dyn DrawingHandle;

    /// Restrict drawing to `region` (screen pixels), or lift the restriction.
    fn set_scissor(&mut self, region: Option<PixelRect>);
}

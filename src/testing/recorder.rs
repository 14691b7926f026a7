//! RecordingRenderer: a render backend that only writes things down.

use std::fmt;

use crate::geometry::{Color, PixelRect, Point, Vec2};
use crate::render::{DrawingHandle, RenderHandle, TextureId};

// ---------------------------------------------------------------------------
// DrawCall
// ---------------------------------------------------------------------------

/// A rectangle draw together with the transform and modulate active at the
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRect {
    pub rect: PixelRect,
    pub color: Color,
    pub filled: bool,
    pub transform: Vec2,
    pub modulate: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedString {
    pub position: Vec2,
    pub text: String,
    pub color: Color,
    pub transform: Vec2,
    pub modulate: Color,
}

/// One call received by the renderer, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Transform { position: Vec2, scale: Vec2 },
    Modulate(Color),
    Scissor(Option<PixelRect>),
    Rect(RecordedRect),
    Line { from: Vec2, to: Vec2, color: Color },
    String(RecordedString),
    Texture { texture: TextureId, rect: PixelRect, modulate: Option<Color> },
}

fn write_rect(f: &mut fmt::Formatter<'_>, rect: PixelRect) -> fmt::Result {
    write!(f, "{},{} {},{}", rect.left, rect.top, rect.right, rect.bottom)
}

impl fmt::Display for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCall::Transform { position, .. } => write!(f, "transform {},{}", position.x, position.y),
            DrawCall::Modulate(c) => write!(f, "modulate {} {} {} {}", c.r, c.g, c.b, c.a),
            DrawCall::Scissor(None) => write!(f, "scissor -"),
            DrawCall::Scissor(Some(rect)) => {
                write!(f, "scissor ")?;
                write_rect(f, *rect)
            }
            DrawCall::Rect(r) => {
                write!(f, "rect ")?;
                write_rect(f, r.rect)?;
                write!(f, " {}", if r.filled { "filled" } else { "outline" })
            }
            DrawCall::Line { from, to, .. } => {
                write!(f, "line {},{} {},{}", from.x, from.y, to.x, to.y)
            }
            DrawCall::String(s) => write!(f, "string {},{} {:?}", s.position.x, s.position.y, s.text),
            DrawCall::Texture { texture, rect, .. } => {
                write!(f, "texture #{} ", texture.0)?;
                write_rect(f, *rect)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingRenderer
// ---------------------------------------------------------------------------

/// Implements both render traits and keeps every call.
///
/// # Examples
///
/// ```ignore
/// let mut renderer = RecordingRenderer::new();
/// ui.render(&mut renderer);
/// assert_eq!(renderer.scissors(), vec![]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<DrawCall>,
    transform: Vec2,
    modulate: Color,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Scissor changes, in order.
    pub fn scissors(&self) -> Vec<Option<PixelRect>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Scissor(region) => Some(*region),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<RecordedRect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn strings(&self) -> Vec<RecordedString> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether a rect or string was drawn with its origin at `origin`.
    pub fn drew_at(&self, origin: Point) -> bool {
        let origin = origin.to_vec2();
        self.rects().iter().any(|r| r.transform == origin)
            || self.strings().iter().any(|s| s.transform == origin)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawingHandle for RecordingRenderer {
    fn set_transform(&mut self, position: Vec2, scale: Vec2) {
        self.transform = position;
        self.calls.push(DrawCall::Transform { position, scale });
    }

    fn set_modulate(&mut self, modulate: Color) {
        self.modulate = modulate;
        self.calls.push(DrawCall::Modulate(modulate));
    }

    fn draw_rect(&mut self, rect: PixelRect, color: Color, filled: bool) {
        self.calls.push(DrawCall::Rect(RecordedRect {
            rect,
            color,
            filled,
            transform: self.transform,
            modulate: self.modulate,
        }));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn draw_string(&mut self, position: Vec2, text: &str, color: Color) {
        self.calls.push(DrawCall::String(RecordedString {
            position,
            text: text.to_string(),
            color,
            transform: self.transform,
            modulate: self.modulate,
        }));
    }

    fn draw_texture_rect(&mut self, texture: TextureId, rect: PixelRect, modulate: Option<Color>) {
        self.calls.push(DrawCall::Texture { texture, rect, modulate });
    }
}

impl RenderHandle for RecordingRenderer {
    fn drawing_handle(&mut self) -> &mut dyn DrawingHandle {
        self
    }

    fn set_scissor(&mut self, region: Option<PixelRect>) {
        self.calls.push(DrawCall::Scissor(region));
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_capture_current_state() {
        let mut r = RecordingRenderer::new();
        r.set_transform(Vec2::new(3.0, 4.0), Vec2::ONE);
        r.set_modulate(Color::BLACK);
        r.draw_rect(PixelRect::new(0, 0, 2, 2), Color::WHITE, false);

        let rects = r.rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].transform, Vec2::new(3.0, 4.0));
        assert_eq!(rects[0].modulate, Color::BLACK);
        assert!(r.drew_at(Point::new(3, 4)));
    }

    #[test]
    fn display_forms() {
        assert_eq!(DrawCall::Scissor(None).to_string(), "scissor -");
        assert_eq!(
            DrawCall::Scissor(Some(PixelRect::new(1, 2, 3, 4))).to_string(),
            "scissor 1,2 3,4"
        );
        let mut r = RecordingRenderer::new();
        r.draw_string(Vec2::new(1.0, 0.0), "ok", Color::WHITE);
        assert_eq!(r.calls()[0].to_string(), "string 1,0 \"ok\"");
    }

    #[test]
    fn clear_forgets_calls() {
        let mut r = RecordingRenderer::new();
        r.set_scissor(None);
        r.clear();
        assert!(r.calls().is_empty());
    }
}

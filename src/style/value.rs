//! Resolved style values and typed extraction.
//!
//! A [`StyleValue`] is what a declaration resolves to. The control tree never
//! interprets values itself; widgets pull them out with [`FromStyleValue`].

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::geometry::{Color, PixelRect, Vec2};
use crate::render::DrawingHandle;

// ---------------------------------------------------------------------------
// StyleBox
// ---------------------------------------------------------------------------

/// A flat box style: optional background fill plus content margins.
///
/// Margins are in pixels; the minimum size a box imposes is the sum of its
/// opposing margins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBox {
    pub background: Option<Color>,
    pub content_margin_left: f32,
    pub content_margin_top: f32,
    pub content_margin_right: f32,
    pub content_margin_bottom: f32,
}

impl StyleBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background fill (builder).
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set all four content margins at once (builder).
    pub fn with_content_margin(mut self, margin: f32) -> Self {
        self.content_margin_left = margin;
        self.content_margin_top = margin;
        self.content_margin_right = margin;
        self.content_margin_bottom = margin;
        self
    }

    /// Smallest pixel size that fits the margins.
    pub fn minimum_size(&self) -> Vec2 {
        Vec2::new(
            self.content_margin_left + self.content_margin_right,
            self.content_margin_top + self.content_margin_bottom,
        )
    }

    /// Shrink `rect` by the content margins.
    pub fn content_box(&self, rect: PixelRect) -> PixelRect {
        PixelRect::new(
            rect.left + self.content_margin_left.round() as i32,
            rect.top + self.content_margin_top.round() as i32,
            rect.right - self.content_margin_right.round() as i32,
            rect.bottom - self.content_margin_bottom.round() as i32,
        )
    }

    /// Fill `rect` with the background, if any.
    pub fn draw(&self, handle: &mut dyn DrawingHandle, rect: PixelRect) {
        if let Some(color) = self.background {
            handle.draw_rect(rect, color, true);
        }
    }
}

// ---------------------------------------------------------------------------
// StyleValue
// ---------------------------------------------------------------------------

/// A resolved, opaque style value.
#[derive(Clone)]
pub enum StyleValue {
    Number(f32),
    Vec2(Vec2),
    Color(Color),
    Bool(bool),
    Ident(String),
    Str(String),
    StyleBox(Rc<StyleBox>),
    /// Host-defined payload (fonts, textures) the tree only stores.
    Custom(Rc<dyn Any>),
}

impl fmt::Debug for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "Number({n})"),
            Self::Vec2(v) => write!(f, "Vec2({}, {})", v.x, v.y),
            Self::Color(c) => write!(f, "Color({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Ident(s) => write!(f, "Ident({s:?})"),
            Self::Str(s) => write!(f, "Str({s:?})"),
            Self::StyleBox(b) => write!(f, "StyleBox({b:?})"),
            Self::Custom(_) => write!(f, "Custom(<opaque>)"),
        }
    }
}

impl PartialEq for StyleValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Vec2(a), Self::Vec2(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Ident(a), Self::Ident(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::StyleBox(a), Self::StyleBox(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f32> for StyleValue {
    fn from(v: f32) -> Self {
        Self::Number(v)
    }
}

impl From<Vec2> for StyleValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Color> for StyleValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<StyleBox> for StyleValue {
    fn from(v: StyleBox) -> Self {
        Self::StyleBox(Rc::new(v))
    }
}

// ---------------------------------------------------------------------------
// FromStyleValue
// ---------------------------------------------------------------------------

/// Typed extraction from a [`StyleValue`]. Returns `None` on a type mismatch.
pub trait FromStyleValue: Sized {
    fn from_style_value(value: &StyleValue) -> Option<Self>;
}

impl FromStyleValue for f32 {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromStyleValue for Vec2 {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Vec2(v) => Some(*v),
            StyleValue::Number(n) => Some(Vec2::new(*n, *n)),
            _ => None,
        }
    }
}

impl FromStyleValue for Color {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromStyleValue for bool {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromStyleValue for String {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Ident(s) | StyleValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromStyleValue for Rc<StyleBox> {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::StyleBox(b) => Some(Rc::clone(b)),
            _ => None,
        }
    }
}

impl FromStyleValue for StyleValue {
    fn from_style_value(value: &StyleValue) -> Option<Self> {
        Some(value.clone())
    }
}

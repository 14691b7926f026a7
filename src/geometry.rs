//! Core geometry types: Vec2, Point, Rect, PixelRect, Color.
//!
//! Logical coordinates are resolution-independent `f32` values ([`Vec2`], [`Rect`]).
//! Pixel coordinates are integers ([`Point`], [`PixelRect`]) derived from logical
//! values by multiplying with the current UI scale and rounding.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A 2D vector in logical (scale-independent) units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    /// `(1, 1)`.
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn component_max(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn component_min(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    /// Round both components to the nearest integer [`Point`].
    #[inline]
    pub fn round(self) -> Point {
        Point { x: self.x.round() as i32, y: self.y.round() as i32 }
    }

    /// Truncate both components towards zero.
    #[inline]
    pub fn to_point(self) -> Point {
        Point { x: self.x as i32, y: self.y as i32 }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x / rhs, y: self.y / rhs }
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer position or size in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to a floating-point [`Vec2`].
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2 { x: self.x as f32, y: self.y as f32 }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned box in logical units, stored as its four edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a box from its edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create a box from a top-left position and a size.
    #[inline]
    pub fn from_dimensions(position: Vec2, size: Vec2) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + size.x,
            bottom: position.y + size.y,
        }
    }

    #[inline]
    pub fn width(self) -> f32 {
        (self.right - self.left).abs()
    }

    #[inline]
    pub fn height(self) -> f32 {
        (self.bottom - self.top).abs()
    }

    #[inline]
    pub fn top_left(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Whether `point` lies inside the box, edges included.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Scale every edge, yielding the pixel-space box (rounded).
    #[inline]
    pub fn scaled(self, scale: f32) -> PixelRect {
        PixelRect::new(
            (self.left * scale).round() as i32,
            (self.top * scale).round() as i32,
            (self.right * scale).round() as i32,
            (self.bottom * scale).round() as i32,
        )
    }
}

// ---------------------------------------------------------------------------
// PixelRect
// ---------------------------------------------------------------------------

/// An axis-aligned box in screen pixels.
///
/// Containment and intersection treat the box as a closed region: a box that
/// merely touches another along an edge intersects it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Create a box from its edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create a box from a top-left position and a size.
    #[inline]
    pub const fn from_dimensions(position: Point, size: Point) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + size.x,
            bottom: position.y + size.y,
        }
    }

    #[inline]
    pub const fn width(self) -> i32 {
        (self.right - self.left).abs()
    }

    #[inline]
    pub const fn height(self) -> i32 {
        (self.bottom - self.top).abs()
    }

    #[inline]
    pub const fn top_left(self) -> Point {
        Point { x: self.left, y: self.top }
    }

    #[inline]
    pub const fn bottom_right(self) -> Point {
        Point { x: self.right, y: self.bottom }
    }

    /// Whether `point` lies inside the box, edges included.
    #[inline]
    pub const fn contains(self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Whether the two closed boxes share at least one point.
    #[inline]
    pub const fn intersects(self, other: PixelRect) -> bool {
        other.bottom >= self.top
            && other.top <= self.bottom
            && other.right >= self.left
            && other.left <= self.right
    }

    /// The largest box contained in both, or `None` if they do not intersect.
    #[inline]
    pub fn intersection(self, other: PixelRect) -> Option<PixelRect> {
        if !self.intersects(other) {
            return None;
        }
        Some(PixelRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        })
    }

    /// Translate the box by `offset`.
    #[inline]
    pub const fn translated(self, offset: Point) -> PixelRect {
        PixelRect {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }

    /// Expand the box outward by `amount` pixels on every side.
    #[inline]
    pub const fn grown(self, amount: i32) -> PixelRect {
        PixelRect {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A linear RGBA color with components in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Create a new color.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Component-wise product, used to stack modulate colors down the tree.
impl Mul for Color {
    type Output = Color;
    #[inline]
    fn mul(self, rhs: Color) -> Color {
        Color {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

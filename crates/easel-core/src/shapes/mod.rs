//! Shape definitions and geometry utilities.

mod circle;
mod freehand;
mod line;
mod rectangle;

pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hit tolerance for lines, in canvas pixels.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;
/// Hit tolerance for freehand strokes, in canvas pixels.
pub const FREEHAND_HIT_TOLERANCE: f64 = 8.0;

/// Allowed stroke width range.
pub const STROKE_WIDTH_MIN: f64 = 1.0;
pub const STROKE_WIDTH_MAX: f64 = 10.0;

/// An RGBA8 color that serializes as a CSS-style hex string
/// (`#rrggbb`, or `#rrggbbaa` when the alpha channel is not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?.trim();
        // Byte-indexed slicing below; non-ASCII input must not reach it.
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::opaque(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::opaque(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color string: {s:?}")))
    }
}

/// Stroke dash style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash pattern for a raster paint surface (empty = solid).
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => &[10.0, 5.0],
            LineStyle::Dotted => &[2.0, 2.0],
        }
    }
}

/// Style properties shared by all shapes.
///
/// `fill_color` is only meaningful for rectangles and circles; lines and
/// freehand strokes leave it unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub stroke_color: Rgba,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Rgba>,
    #[serde(rename = "lineWidth")]
    pub stroke_width: f64,
    pub line_style: LineStyle,
}

impl ShapeStyle {
    /// A copy of this style without the fill, for stroke-only shapes.
    pub fn stroke_only(&self) -> Self {
        Self {
            fill_color: None,
            ..self.clone()
        }
    }

    /// Clamp the stroke width into the allowed range.
    pub fn clamp_width(width: f64) -> f64 {
        width.clamp(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::black(),
            fill_color: None,
            stroke_width: 2.0,
            line_style: LineStyle::default(),
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

pub(crate) fn fresh_id() -> ShapeId {
    Uuid::new_v4()
}

/// Distance from a point to a line segment (a→b).
///
/// A degenerate segment (`a == b`) yields the Euclidean distance to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    point.distance(proj)
}

/// Minimum distance from a point to a polyline (consecutive segments).
/// Returns infinity for fewer than two points.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common operations implemented by every shape variant.
pub trait ShapeOps {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point) -> bool;

    /// Move the whole shape by a delta.
    fn translate(&mut self, delta: Vec2);

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Tagged union over all shape variants.
///
/// Serializes as an internally tagged record, e.g.
/// `{"type": "rectangle", "position": {...}, ...}`. The freehand variant
/// uses the tag `"freedraw"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    #[serde(rename = "freedraw")]
    Freehand(Freehand),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Freehand(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Circle(s) => s.hit_test(point),
            Shape::Line(s) => s.hit_test(point),
            Shape::Freehand(s) => s.hit_test(point),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Line(s) => s.translate(delta),
            Shape::Freehand(s) => s.translate(delta),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Freehand(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Circle(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
            Shape::Freehand(s) => s.style_mut(),
        }
    }

    /// The reference coordinate used to compute drag offsets: the origin
    /// for rectangles, the center for circles, and the first endpoint or
    /// sample for lines and freehand strokes.
    pub fn anchor(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position,
            Shape::Circle(s) => s.center,
            Shape::Line(s) => s.start,
            Shape::Freehand(s) => s.points.first().copied().unwrap_or(Point::ZERO),
        }
    }

    /// Whether this variant carries a fill (rectangles and circles).
    pub fn supports_fill(&self) -> bool {
        matches!(self, Shape::Rectangle(_) | Shape::Circle(_))
    }

    /// Assign a fresh unique id. Used when duplicating shapes.
    pub fn regenerate_id(&mut self) {
        let new_id = fresh_id();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Circle(s) => s.id = new_id,
            Shape::Line(s) => s.id = new_id,
            Shape::Freehand(s) => s.id = new_id,
        }
    }
}

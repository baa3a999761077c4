//! Freehand stroke shape.

use super::{
    FREEHAND_HIT_TOLERANCE, ShapeId, ShapeOps, ShapeStyle, fresh_id, point_to_polyline_dist,
};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke: an ordered sequence of sampled points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ShapeId,
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Freehand {
    /// Start a stroke from its first sample.
    pub fn starting_at(point: Point) -> Self {
        Self::from_points(vec![point])
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: fresh_id(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Append a sample to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeOps for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        let mut bounds = Rect::new(first.x, first.y, first.x, first.y);
        for point in &self.points[1..] {
            bounds.x0 = bounds.x0.min(point.x);
            bounds.y0 = bounds.y0.min(point.y);
            bounds.x1 = bounds.x1.max(point.x);
            bounds.y1 = bounds.y1.max(point.y);
        }
        bounds
    }

    fn hit_test(&self, point: Point) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance(point) <= FREEHAND_HIT_TOLERANCE,
            points => point_to_polyline_dist(point, points) <= FREEHAND_HIT_TOLERANCE,
        }
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

//! Line shape.

use super::{LINE_HIT_TOLERANCE, ShapeId, ShapeOps, ShapeStyle, fresh_id, point_to_segment_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Line {
    /// Create a line with the raw endpoints, unmodified.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: fresh_id(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeOps for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= LINE_HIT_TOLERANCE
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

//! Circle shape.

use super::{ShapeId, ShapeOps, ShapeStyle, fresh_id};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ShapeId,
    pub center: Point,
    pub radius: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: fresh_id(),
            center,
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Build a circle from a drag gesture: center at the press point,
    /// radius the distance to the release point.
    pub fn from_drag(press: Point, release: Point) -> Self {
        Self::new(press, press.distance(release))
    }
}

impl ShapeOps for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_drag() {
        let circle = Circle::from_drag(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((circle.radius - 5.0).abs() < f64::EPSILON);
        assert!((circle.center.x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let circle = Circle::new(Point::new(50.0, 50.0), 10.0);
        assert!(circle.hit_test(Point::new(50.0, 50.0)));
        assert!(circle.hit_test(Point::new(60.0, 50.0)));
        assert!(!circle.hit_test(Point::new(61.0, 50.0)));
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(50.0, 50.0), 10.0);
        let bounds = circle.bounds();
        assert!((bounds.x0 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 60.0).abs() < f64::EPSILON);
    }
}

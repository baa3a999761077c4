//! Resize handles for the selected shape.

use crate::shapes::{Circle, Line, Rectangle, Shape};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Hit radius around a handle, in canvas pixels.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;
/// Minimum width/height/radius a resize may leave behind.
pub const MIN_SHAPE_SIZE: f64 = 5.0;

/// Corner positions of a rectangle, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

/// Edge midpoints of a rectangle, also used for the four circle handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

/// Line endpoint handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineEnd {
    Start,
    End,
}

/// Which handle of the selected shape a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    Edge(Edge),
    Endpoint(LineEnd),
}

/// A handle with its position on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point falls within the handle's hit radius.
    pub fn hit_test(&self, point: Point) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= HANDLE_HIT_RADIUS * HANDLE_HIT_RADIUS
    }
}

/// Compute the resize handles for a shape.
///
/// Rectangles get four corners plus four edge midpoints; circles get the
/// four axis points; lines get their endpoints; freehand strokes have no
/// resize handles.
pub fn handles_for(shape: &Shape) -> Vec<Handle> {
    match shape {
        Shape::Rectangle(rect) => {
            let (x, y) = (rect.position.x, rect.position.y);
            let (w, h) = (rect.width, rect.height);
            vec![
                Handle::new(Point::new(x, y), HandleKind::Corner(Corner::NorthWest)),
                Handle::new(Point::new(x + w, y), HandleKind::Corner(Corner::NorthEast)),
                Handle::new(Point::new(x + w, y + h), HandleKind::Corner(Corner::SouthEast)),
                Handle::new(Point::new(x, y + h), HandleKind::Corner(Corner::SouthWest)),
                Handle::new(Point::new(x + w / 2.0, y), HandleKind::Edge(Edge::North)),
                Handle::new(Point::new(x + w, y + h / 2.0), HandleKind::Edge(Edge::East)),
                Handle::new(Point::new(x + w / 2.0, y + h), HandleKind::Edge(Edge::South)),
                Handle::new(Point::new(x, y + h / 2.0), HandleKind::Edge(Edge::West)),
            ]
        }
        Shape::Circle(circle) => {
            let c = circle.center;
            let r = circle.radius;
            vec![
                Handle::new(Point::new(c.x, c.y - r), HandleKind::Edge(Edge::North)),
                Handle::new(Point::new(c.x + r, c.y), HandleKind::Edge(Edge::East)),
                Handle::new(Point::new(c.x, c.y + r), HandleKind::Edge(Edge::South)),
                Handle::new(Point::new(c.x - r, c.y), HandleKind::Edge(Edge::West)),
            ]
        }
        Shape::Line(line) => vec![
            Handle::new(line.start, HandleKind::Endpoint(LineEnd::Start)),
            Handle::new(line.end, HandleKind::Endpoint(LineEnd::End)),
        ],
        Shape::Freehand(_) => Vec::new(),
    }
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(shape: &Shape, point: Point) -> Option<HandleKind> {
    handles_for(shape)
        .into_iter()
        .find(|handle| handle.hit_test(point))
        .map(|handle| handle.kind)
}

/// Apply one resize step to a shape.
///
/// `delta` is the pointer movement since the previous sample. Sizes are
/// clamped to [`MIN_SHAPE_SIZE`] after every step so a shape can never
/// invert. Handle kinds that don't apply to the shape are ignored.
pub fn apply_resize(shape: &mut Shape, handle: HandleKind, delta: Vec2) {
    match shape {
        Shape::Rectangle(rect) => resize_rectangle(rect, handle, delta),
        Shape::Circle(circle) => resize_circle(circle, handle, delta),
        Shape::Line(line) => resize_line(line, handle, delta),
        Shape::Freehand(_) => {}
    }
}

fn resize_rectangle(rect: &mut Rectangle, handle: HandleKind, delta: Vec2) {
    match handle {
        HandleKind::Corner(Corner::NorthWest) => {
            rect.position += delta;
            rect.width -= delta.x;
            rect.height -= delta.y;
        }
        HandleKind::Corner(Corner::NorthEast) => {
            rect.position.y += delta.y;
            rect.width += delta.x;
            rect.height -= delta.y;
        }
        HandleKind::Corner(Corner::SouthEast) => {
            rect.width += delta.x;
            rect.height += delta.y;
        }
        HandleKind::Corner(Corner::SouthWest) => {
            rect.position.x += delta.x;
            rect.width -= delta.x;
            rect.height += delta.y;
        }
        HandleKind::Edge(Edge::North) => {
            rect.position.y += delta.y;
            rect.height -= delta.y;
        }
        HandleKind::Edge(Edge::East) => rect.width += delta.x,
        HandleKind::Edge(Edge::South) => rect.height += delta.y,
        HandleKind::Edge(Edge::West) => {
            rect.position.x += delta.x;
            rect.width -= delta.x;
        }
        HandleKind::Endpoint(_) => {}
    }
    rect.width = rect.width.max(MIN_SHAPE_SIZE);
    rect.height = rect.height.max(MIN_SHAPE_SIZE);
}

fn resize_circle(circle: &mut Circle, handle: HandleKind, delta: Vec2) {
    // Screen Y points down, so the north handle shrinks on positive dy.
    match handle {
        HandleKind::Edge(Edge::North) => circle.radius -= delta.y,
        HandleKind::Edge(Edge::East) => circle.radius += delta.x,
        HandleKind::Edge(Edge::South) => circle.radius += delta.y,
        HandleKind::Edge(Edge::West) => circle.radius -= delta.x,
        _ => {}
    }
    circle.radius = circle.radius.max(MIN_SHAPE_SIZE);
}

fn resize_line(line: &mut Line, handle: HandleKind, delta: Vec2) {
    match handle {
        HandleKind::Endpoint(LineEnd::Start) => line.start += delta,
        HandleKind::Endpoint(LineEnd::End) => line.end += delta,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Freehand;

    #[test]
    fn test_rectangle_handle_layout() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0);
        let handles = handles_for(&Shape::Rectangle(rect));
        assert_eq!(handles.len(), 8);
        assert!(matches!(handles[0].kind, HandleKind::Corner(Corner::NorthWest)));
        // East edge midpoint.
        let east = handles
            .iter()
            .find(|h| h.kind == HandleKind::Edge(Edge::East))
            .unwrap();
        assert!((east.position.x - 100.0).abs() < f64::EPSILON);
        assert!((east.position.y - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_and_line_handles() {
        let circle = Circle::new(Point::new(50.0, 50.0), 20.0);
        assert_eq!(handles_for(&Shape::Circle(circle)).len(), 4);

        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let handles = handles_for(&Shape::Line(line));
        assert_eq!(handles.len(), 2);
        assert!(matches!(handles[0].kind, HandleKind::Endpoint(LineEnd::Start)));

        let stroke = Freehand::starting_at(Point::new(0.0, 0.0));
        assert!(handles_for(&Shape::Freehand(stroke)).is_empty());
    }

    #[test]
    fn test_handle_hit_radius() {
        let handle = Handle::new(Point::new(50.0, 50.0), HandleKind::Edge(Edge::North));
        assert!(handle.hit_test(Point::new(50.0, 50.0)));
        assert!(handle.hit_test(Point::new(55.0, 55.0)));
        assert!(!handle.hit_test(Point::new(60.0, 60.0)));
    }

    #[test]
    fn test_se_resize_grows() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));
        apply_resize(&mut shape, HandleKind::Corner(Corner::SouthEast), Vec2::new(50.0, 25.0));
        let Shape::Rectangle(rect) = shape else { unreachable!() };
        assert!((rect.width - 150.0).abs() < f64::EPSILON);
        assert!((rect.height - 125.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nw_resize_shifts_origin() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(10.0, 10.0), 100.0, 100.0));
        apply_resize(&mut shape, HandleKind::Corner(Corner::NorthWest), Vec2::new(5.0, 5.0));
        let Shape::Rectangle(rect) = shape else { unreachable!() };
        assert!((rect.position.x - 15.0).abs() < f64::EPSILON);
        assert!((rect.width - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));
        apply_resize(
            &mut shape,
            HandleKind::Corner(Corner::SouthEast),
            Vec2::new(-1000.0, -1000.0),
        );
        let Shape::Rectangle(rect) = shape else { unreachable!() };
        assert!((rect.width - MIN_SHAPE_SIZE).abs() < f64::EPSILON);
        assert!((rect.height - MIN_SHAPE_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_resize_directions() {
        let mut shape = Shape::Circle(Circle::new(Point::new(0.0, 0.0), 20.0));
        // North handle dragged up (negative dy) grows the radius.
        apply_resize(&mut shape, HandleKind::Edge(Edge::North), Vec2::new(0.0, -5.0));
        let Shape::Circle(ref circle) = shape else { unreachable!() };
        assert!((circle.radius - 25.0).abs() < f64::EPSILON);

        apply_resize(&mut shape, HandleKind::Edge(Edge::East), Vec2::new(-100.0, 0.0));
        let Shape::Circle(circle) = shape else { unreachable!() };
        assert!((circle.radius - MIN_SHAPE_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_endpoint_resize() {
        let mut shape = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        apply_resize(&mut shape, HandleKind::Endpoint(LineEnd::End), Vec2::new(10.0, 20.0));
        let Shape::Line(line) = shape else { unreachable!() };
        assert!((line.end.x - 110.0).abs() < f64::EPSILON);
        assert!((line.end.y - 20.0).abs() < f64::EPSILON);
        // Start endpoint untouched.
        assert!((line.start.x).abs() < f64::EPSILON);
    }
}

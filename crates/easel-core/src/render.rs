//! Display list construction.
//!
//! The editor stays backend-agnostic: each frame the host asks for a
//! [`DisplayList`] and paints its items in order with whatever 2D canvas it
//! has. Items carry resolved style (colors, width, dash pattern), so the
//! painter needs no knowledge of shapes or selection.

use crate::handles::handles_for;
use crate::interaction::Editor;
use crate::shapes::{Rgba, Shape};
use kurbo::{Point, Rect};

/// Accent color for selection outlines and handle markers.
pub const SELECTION_COLOR: Rgba = Rgba::new(0x66, 0x7e, 0xea, 0xff);
/// Gap between a shape's bounds and its selection outline.
pub const SELECTION_MARGIN: f64 = 5.0;
/// Painted radius of a handle marker.
pub const HANDLE_MARKER_RADIUS: f64 = 6.0;

const SELECTION_DASH: &[f64] = &[5.0, 5.0];
const SOLID: &[f64] = &[];

/// Geometry of one display item.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(Rect),
    Circle { center: Point, radius: f64 },
    Segment { from: Point, to: Point },
    Polyline(Vec<Point>),
}

/// One paint operation: geometry plus resolved style.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub primitive: Primitive,
    /// Fill color, painted before the stroke when present.
    pub fill: Option<Rgba>,
    pub stroke: Rgba,
    pub stroke_width: f64,
    /// Dash pattern in canvas pixels; empty means solid.
    pub dash: &'static [f64],
}

/// Paint operations for one frame, back to front.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub items: Vec<DrawItem>,
}

impl DisplayList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build the frame's display list: shapes in paint order, then the
/// selection overlay, then the in-progress preview.
pub fn build_display_list(editor: &Editor) -> DisplayList {
    let mut list = DisplayList::default();

    for shape in editor.scene.shapes_ordered() {
        if let Some(item) = shape_item(shape) {
            list.items.push(item);
        }
    }

    if let Some(shape) = editor.scene.selected_shape() {
        push_selection_overlay(&mut list, shape);
    }

    if let Some(preview) = editor.preview_shape() {
        if let Some(mut item) = shape_item(&preview) {
            item.fill = None;
            list.items.push(item);
        }
    }

    list
}

fn shape_item(shape: &Shape) -> Option<DrawItem> {
    let style = shape.style();
    let primitive = match shape {
        Shape::Rectangle(rect) => Primitive::Rect(rect.as_rect()),
        Shape::Circle(circle) => Primitive::Circle {
            center: circle.center,
            radius: circle.radius,
        },
        Shape::Line(line) => Primitive::Segment {
            from: line.start,
            to: line.end,
        },
        Shape::Freehand(stroke) => {
            // A stroke needs two samples before it paints anything.
            if stroke.len() < 2 {
                return None;
            }
            Primitive::Polyline(stroke.points.clone())
        }
    };
    Some(DrawItem {
        primitive,
        fill: style.fill_color,
        stroke: style.stroke_color,
        stroke_width: style.stroke_width,
        dash: style.line_style.dash_pattern(),
    })
}

fn push_selection_overlay(list: &mut DisplayList, shape: &Shape) {
    let outline = match shape {
        // Lines get their outline drawn on the segment itself.
        Shape::Line(line) => Primitive::Segment {
            from: line.start,
            to: line.end,
        },
        Shape::Circle(circle) => Primitive::Circle {
            center: circle.center,
            radius: circle.radius + SELECTION_MARGIN,
        },
        _ => Primitive::Rect(shape.bounds().inflate(SELECTION_MARGIN, SELECTION_MARGIN)),
    };
    list.items.push(DrawItem {
        primitive: outline,
        fill: None,
        stroke: SELECTION_COLOR,
        stroke_width: 2.0,
        dash: SELECTION_DASH,
    });

    for handle in handles_for(shape) {
        list.items.push(DrawItem {
            primitive: Primitive::Circle {
                center: handle.position,
                radius: HANDLE_MARKER_RADIUS,
            },
            fill: Some(SELECTION_COLOR),
            stroke: Rgba::white(),
            stroke_width: 2.0,
            dash: SOLID,
        });
    }
}

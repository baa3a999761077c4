//! Scene: the ordered shape collection plus selection state.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Offset applied to duplicated shapes.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Errors from loading persisted scene data.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid drawing data: {0}")]
    InvalidData(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted document form. Saving always writes this object shape;
/// loading also accepts a bare array of shape records.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneDocument {
    elements: Vec<Shape>,
    #[serde(default = "default_canvas_width")]
    canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    canvas_height: f64,
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

/// The ordered collection of shapes on the canvas.
///
/// Paint order is insertion order (later = on top), tracked by an explicit
/// z-order vector over shapes keyed by id. At most one shape is selected,
/// referenced by id rather than ownership.
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
    selected: Option<ShapeId>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    pub fn with_size(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            selected: None,
            canvas_width,
            canvas_height,
        }
    }

    /// Add a shape on top of the paint order.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
    }

    /// Remove a shape. Clears the selection if it pointed at the shape.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.shapes.remove(&id)
    }

    /// Remove all shapes and clear the selection.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.selected = None;
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Shapes in paint order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Find the topmost shape at a point. Iterates in reverse paint order
    /// so overlapping shapes resolve to the most recently inserted.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.hit_test(point)))
    }

    /// Select a shape by id. Returns false if the id is unknown.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.shapes.contains_key(&id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shapes.get(&id))
    }

    pub fn selected_shape_mut(&mut self) -> Option<&mut Shape> {
        self.selected.and_then(|id| self.shapes.get_mut(&id))
    }

    /// Deep-copy a shape under a fresh id, offset by `offset`, inserted on
    /// top and selected. Returns the new id.
    pub fn duplicate_shape(&mut self, id: ShapeId, offset: Vec2) -> Option<ShapeId> {
        let mut copy = self.shapes.get(&id)?.clone();
        copy.regenerate_id();
        copy.translate(offset);
        let new_id = copy.id();
        self.add_shape(copy);
        self.selected = Some(new_id);
        Some(new_id)
    }

    /// Serialize to the object document form.
    pub fn to_json(&self) -> Result<String, SceneError> {
        let doc = SceneDocument {
            elements: self.shapes_ordered().cloned().collect(),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Parse a persisted scene. Accepts either a bare array of shape
    /// records or the object document form; anything else is rejected.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let doc = match value {
            serde_json::Value::Array(_) => SceneDocument {
                elements: serde_json::from_value(value)?,
                canvas_width: DEFAULT_CANVAS_WIDTH,
                canvas_height: DEFAULT_CANVAS_HEIGHT,
            },
            serde_json::Value::Object(_) => serde_json::from_value(value)?,
            other => {
                return Err(SceneError::InvalidData(format!(
                    "expected an array or object of shapes, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let mut scene = Scene::with_size(doc.canvas_width, doc.canvas_height);
        for shape in doc.elements {
            if scene.shapes.contains_key(&shape.id()) {
                return Err(SceneError::InvalidData(format!(
                    "duplicate shape id {}",
                    shape.id()
                )));
            }
            scene.add_shape(shape);
        }
        log::debug!("loaded scene with {} shapes", scene.len());
        Ok(scene)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Freehand, Line, Rectangle, Rgba, ShapeOps};

    fn sample_rect() -> Rectangle {
        Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0)
    }

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new();
        let rect = sample_rect();
        let id = rect.id();
        scene.add_shape(Shape::Rectangle(rect));
        assert_eq!(scene.len(), 1);
        assert!(scene.remove_shape(id).is_some());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut scene = Scene::new();
        let rect = sample_rect();
        let id = rect.id();
        scene.add_shape(Shape::Rectangle(rect));
        scene.select(id);
        scene.remove_shape(id);
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut scene = Scene::new();
        let bottom = sample_rect();
        let top = Rectangle::new(Point::new(50.0, 50.0), 100.0, 100.0);
        let bottom_id = bottom.id();
        let top_id = top.id();
        scene.add_shape(Shape::Rectangle(bottom));
        scene.add_shape(Shape::Rectangle(top));

        // Overlap region resolves to the most recently inserted shape.
        assert_eq!(scene.hit_test(Point::new(75.0, 75.0)), Some(top_id));
        assert_eq!(scene.hit_test(Point::new(25.0, 25.0)), Some(bottom_id));
        assert_eq!(scene.hit_test(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_select_unknown_id() {
        let mut scene = Scene::new();
        assert!(!scene.select(crate::shapes::fresh_id()));
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_duplicate_offsets_and_selects() {
        let mut scene = Scene::new();
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let id = line.id();
        scene.add_shape(Shape::Line(line));

        let new_id = scene.duplicate_shape(id, DUPLICATE_OFFSET).unwrap();
        assert_ne!(new_id, id);
        assert_eq!(scene.selected(), Some(new_id));

        let Some(Shape::Line(copy)) = scene.shape(new_id) else {
            panic!("expected a line");
        };
        assert!((copy.start.x - 20.0).abs() < f64::EPSILON);
        assert!((copy.end.y - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut scene = Scene::new();
        let mut rect = sample_rect();
        rect.style.fill_color = Some(Rgba::from_hex("#ff6b6b").unwrap());
        rect.style.stroke_width = 3.0;
        let rect_id = rect.id();
        scene.add_shape(Shape::Rectangle(rect));

        let stroke = Freehand::from_points(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        let stroke_id = stroke.id();
        scene.add_shape(Shape::Freehand(stroke));

        let json = scene.to_json().unwrap();
        let loaded = Scene::from_json(&json).unwrap();

        assert_eq!(loaded.len(), 2);
        let ordered: Vec<ShapeId> = loaded.shapes_ordered().map(Shape::id).collect();
        assert_eq!(ordered, vec![rect_id, stroke_id]);

        let Some(Shape::Rectangle(loaded_rect)) = loaded.shape(rect_id) else {
            panic!("expected a rectangle");
        };
        assert_eq!(loaded_rect.style.fill_color, Some(Rgba::opaque(0xff, 0x6b, 0x6b)));
        assert!((loaded_rect.style.stroke_width - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_bare_array() {
        let circle = Circle::new(Point::new(5.0, 5.0), 10.0);
        let json = serde_json::to_string(&vec![Shape::Circle(circle)]).unwrap();
        let scene = Scene::from_json(&json).unwrap();
        assert_eq!(scene.len(), 1);
        // Canvas size falls back to the defaults for bare arrays.
        assert!((scene.canvas_width - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_rejects_wrong_top_level() {
        assert!(matches!(
            Scene::from_json("\"not a drawing\""),
            Err(SceneError::InvalidData(_))
        ));
        assert!(matches!(Scene::from_json("not json"), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_load_rejects_multibyte_color_string() {
        // A bad color in persisted data must surface as an error, never
        // a panic, even when it contains multi-byte characters.
        let json = r##"[
            {"type": "line",
             "start": {"x": 0.0, "y": 0.0},
             "end": {"x": 10.0, "y": 0.0},
             "strokeColor": "#ñ1",
             "lineWidth": 2.0,
             "lineStyle": "solid"}
        ]"##;
        assert!(matches!(Scene::from_json(json), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let rect = sample_rect();
        let json =
            serde_json::to_string(&vec![Shape::Rectangle(rect.clone()), Shape::Rectangle(rect)])
                .unwrap();
        assert!(matches!(
            Scene::from_json(&json),
            Err(SceneError::InvalidData(_))
        ));
    }

    #[test]
    fn test_load_accepts_records_without_ids() {
        let json = r##"{
            "elements": [
                {"type": "line",
                 "start": {"x": 0.0, "y": 0.0},
                 "end": {"x": 10.0, "y": 0.0},
                 "strokeColor": "#2c3e50",
                 "lineWidth": 2.0,
                 "lineStyle": "dashed"}
            ],
            "canvasWidth": 640.0,
            "canvasHeight": 480.0
        }"##;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.len(), 1);
        assert!((scene.canvas_width - 640.0).abs() < f64::EPSILON);
    }
}

//! Pointer interaction state machine.
//!
//! An [`Editor`] is an explicit session object: it owns the scene, the
//! active tool, the current style defaults, and the pointer state, and is
//! driven by pointer-down/move/up events in arrival order. The hosting UI
//! feeds it canvas-local coordinates and renders whatever
//! [`crate::render::build_display_list`] returns.

use crate::handles::{Corner, Edge, HandleKind, LineEnd, apply_resize, hit_test_handles};
use crate::scene::{DUPLICATE_OFFSET, Scene, SceneError};
use crate::shapes::{
    Circle, Freehand, Line, LineStyle, Rectangle, Rgba, Shape, ShapeId, ShapeOps, ShapeStyle,
};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Line,
    #[serde(rename = "freedraw")]
    Freehand,
}

/// Cursor suggestion for the hosting UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Crosshair,
    ResizeNwSe,
    ResizeNeSw,
    ResizeNs,
    ResizeEw,
}

/// Where the current pointer gesture stands.
#[derive(Debug, Clone, Default)]
pub enum PointerState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A box tool is being dragged out; the shape commits on pointer-up.
    Drawing { start: Point, current: Point },
    /// The selected shape tracks the pointer, offset by the distance from
    /// the press point to the shape's anchor.
    Dragging { shape_id: ShapeId, offset: Vec2 },
    /// A resize handle is being dragged; `last` is the previous sample.
    Resizing {
        shape_id: ShapeId,
        handle: HandleKind,
        last: Point,
    },
    /// A freehand stroke is growing point by point.
    Freehand { shape_id: ShapeId },
}

/// The drawing session: scene, tool, style defaults, and pointer state.
#[derive(Debug, Clone)]
pub struct Editor {
    pub scene: Scene,
    tool: ToolKind,
    style: ShapeStyle,
    state: PointerState,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_scene(Scene::new())
    }

    pub fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            tool: ToolKind::default(),
            style: ShapeStyle {
                stroke_color: Rgba::opaque(0x2c, 0x3e, 0x50),
                fill_color: Some(Rgba::opaque(0xff, 0x6b, 0x6b)),
                stroke_width: 2.0,
                line_style: LineStyle::Solid,
            },
            state: PointerState::Idle,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. Any gesture in progress is abandoned.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.state = PointerState::Idle;
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PointerState::Idle)
    }

    /// Handle a pointer press at canvas-local coordinates.
    pub fn pointer_down(&mut self, point: Point) {
        match self.tool {
            ToolKind::Select => self.begin_select_gesture(point),
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line => {
                self.state = PointerState::Drawing {
                    start: point,
                    current: point,
                };
            }
            ToolKind::Freehand => {
                let mut stroke = Freehand::starting_at(point);
                stroke.style = self.style.stroke_only();
                let id = stroke.id();
                self.scene.add_shape(Shape::Freehand(stroke));
                self.scene.select(id);
                self.state = PointerState::Freehand { shape_id: id };
            }
        }
    }

    fn begin_select_gesture(&mut self, point: Point) {
        // Resize handles on the selected shape take priority over hits.
        if let Some(id) = self.scene.selected() {
            if let Some(handle) = self
                .scene
                .shape(id)
                .and_then(|shape| hit_test_handles(shape, point))
            {
                self.state = PointerState::Resizing {
                    shape_id: id,
                    handle,
                    last: point,
                };
                return;
            }
        }

        if let Some(id) = self.scene.hit_test(point) {
            self.scene.select(id);
            // Fixed-origin offset: held for the whole gesture so the shape
            // tracks the pointer without jumping.
            let anchor = self.scene.shape(id).map(Shape::anchor).unwrap_or(point);
            self.state = PointerState::Dragging {
                shape_id: id,
                offset: point - anchor,
            };
        } else {
            self.scene.clear_selection();
            self.state = PointerState::Idle;
        }
    }

    /// Handle pointer movement.
    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.state {
            PointerState::Idle => {}
            PointerState::Drawing { current, .. } => *current = point,
            PointerState::Dragging { shape_id, offset } => {
                let id = *shape_id;
                let offset = *offset;
                if let Some(shape) = self.scene.shape_mut(id) {
                    let delta = (point - offset) - shape.anchor();
                    shape.translate(delta);
                }
            }
            PointerState::Resizing {
                shape_id,
                handle,
                last,
            } => {
                let delta = point - *last;
                *last = point;
                let id = *shape_id;
                let handle = *handle;
                if let Some(shape) = self.scene.shape_mut(id) {
                    apply_resize(shape, handle, delta);
                }
            }
            PointerState::Freehand { shape_id } => {
                let id = *shape_id;
                if let Some(Shape::Freehand(stroke)) = self.scene.shape_mut(id) {
                    stroke.add_point(point);
                }
            }
        }
    }

    /// Handle pointer release. Always returns to idle.
    pub fn pointer_up(&mut self, point: Point) {
        let state = std::mem::take(&mut self.state);
        if let PointerState::Drawing { start, .. } = state {
            if let Some(shape) = create_shape(self.tool, start, point, &self.style) {
                let id = shape.id();
                log::debug!("committed {:?} shape {id}", self.tool);
                self.scene.add_shape(shape);
                self.scene.select(id);
            }
        }
    }

    /// The in-progress shape while a box tool is being dragged out.
    /// Rendered as a stroke-only preview; nothing is in the scene yet.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.state {
            PointerState::Drawing { start, current } => {
                create_shape(self.tool, start, current, &self.style)
            }
            _ => None,
        }
    }

    /// Cursor suggestion for the current pointer position.
    pub fn cursor_hint(&self, point: Point) -> CursorHint {
        if self.tool != ToolKind::Select {
            return CursorHint::Crosshair;
        }
        let Some(handle) = self
            .scene
            .selected_shape()
            .and_then(|shape| hit_test_handles(shape, point))
        else {
            return CursorHint::Default;
        };
        match handle {
            HandleKind::Corner(Corner::NorthWest) | HandleKind::Corner(Corner::SouthEast) => {
                CursorHint::ResizeNwSe
            }
            HandleKind::Corner(Corner::NorthEast) | HandleKind::Corner(Corner::SouthWest) => {
                CursorHint::ResizeNeSw
            }
            HandleKind::Edge(Edge::North) | HandleKind::Edge(Edge::South) => CursorHint::ResizeNs,
            HandleKind::Edge(Edge::East) | HandleKind::Edge(Edge::West) => CursorHint::ResizeEw,
            HandleKind::Endpoint(LineEnd::Start) | HandleKind::Endpoint(LineEnd::End) => {
                CursorHint::Crosshair
            }
        }
    }

    /// Update the default fill color and restyle the selected shape.
    pub fn set_fill_color(&mut self, color: Rgba) {
        self.style.fill_color = Some(color);
        self.restyle_selected();
    }

    /// Update the default stroke color and restyle the selected shape.
    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.style.stroke_color = color;
        self.restyle_selected();
    }

    /// Update the default stroke width (clamped to [1, 10]) and restyle
    /// the selected shape.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = ShapeStyle::clamp_width(width);
        self.restyle_selected();
    }

    /// Update the default line style and restyle the selected shape.
    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.style.line_style = line_style;
        self.restyle_selected();
    }

    fn restyle_selected(&mut self) {
        let style = self.style.clone();
        if let Some(shape) = self.scene.selected_shape_mut() {
            let keep_fill = shape.supports_fill();
            let target = shape.style_mut();
            target.stroke_color = style.stroke_color;
            target.stroke_width = style.stroke_width;
            target.line_style = style.line_style;
            if keep_fill {
                target.fill_color = style.fill_color;
            }
        }
    }

    /// Delete the selected shape. Returns true if one was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.scene.selected() else {
            return false;
        };
        self.scene.remove_shape(id).is_some()
    }

    /// Duplicate the selected shape with the standard (20, 20) offset.
    pub fn duplicate_selected(&mut self) -> Option<ShapeId> {
        let id = self.scene.selected()?;
        self.scene.duplicate_shape(id, DUPLICATE_OFFSET)
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.state = PointerState::Idle;
    }

    /// Serialize the scene to the persisted document form.
    pub fn save_json(&self) -> Result<String, SceneError> {
        self.scene.to_json()
    }

    /// Replace the scene with parsed data. On error the current scene is
    /// left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), SceneError> {
        let scene = Scene::from_json(json)?;
        self.scene = scene;
        self.state = PointerState::Idle;
        Ok(())
    }
}

/// Build the committed shape for a box-tool gesture.
fn create_shape(tool: ToolKind, start: Point, end: Point, style: &ShapeStyle) -> Option<Shape> {
    match tool {
        ToolKind::Rectangle => {
            let mut rect = Rectangle::from_corners(start, end);
            rect.style = style.clone();
            Some(Shape::Rectangle(rect))
        }
        ToolKind::Circle => {
            let mut circle = Circle::from_drag(start, end);
            circle.style = style.clone();
            Some(Shape::Circle(circle))
        }
        ToolKind::Line => {
            let mut line = Line::new(start, end);
            line.style = style.stroke_only();
            Some(Shape::Line(line))
        }
        ToolKind::Select | ToolKind::Freehand => None,
    }
}

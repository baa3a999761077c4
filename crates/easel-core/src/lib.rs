//! Easel Core Library
//!
//! Backend-agnostic scene model, pointer interaction, and persistence for
//! the Easel drawing editor.

pub mod handles;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod storage;

pub use handles::{Handle, HandleKind, handles_for, hit_test_handles};
pub use interaction::{CursorHint, Editor, PointerState, ToolKind};
pub use render::{DisplayList, DrawItem, Primitive, build_display_list};
pub use scene::{Scene, SceneError};
pub use shapes::{LineStyle, Rgba, Shape, ShapeId, ShapeOps, ShapeStyle};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

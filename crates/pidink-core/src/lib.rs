//! PidInk Core Library
//!
//! Platform-agnostic editor core for piping and instrumentation diagrams:
//! shape instances with anchors, orthogonal connector lines, the
//! connection tool and diagram persistence.

pub mod canvas;
pub mod config;
pub mod elbow;
pub mod error;
pub mod input;
pub mod shapes;
pub mod storage;
pub mod tools;
pub mod widget;

pub use canvas::{Canvas, CanvasDocument};
pub use config::{EditorConfig, constrain_resize};
pub use elbow::{compute_elbow_path, reroute_end, reroute_start};
pub use error::{EditorError, EditorResult};
pub use input::{AnchorRef, Gesture};
pub use shapes::{AnchorKind, AnchorSpec, IconSet, Line, ShapeInstance, ShapeType};
pub use storage::{Diagram, DiagramEntry, Storage, StorageError};
pub use tools::{Commit, ConnectionSession, ConnectionState};
pub use widget::{AnchorHandle, WidgetManager};

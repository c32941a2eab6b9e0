//! Anchor metadata for shape types.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Flow direction of a connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnchorKind {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "out")]
    Out,
    #[default]
    #[serde(rename = "in-out")]
    InOut,
}

/// A connection point in a shape type's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorSpec {
    /// Direction of flow through this anchor.
    #[serde(rename = "type", default, deserialize_with = "super::icon::null_as_default")]
    pub kind: AnchorKind,
    /// Offset from the shape's local origin.
    pub x: f64,
    pub y: f64,
}

impl AnchorSpec {
    pub fn new(kind: AnchorKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    /// Offset of this anchor from the owning shape's origin.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Absolute position of this anchor for a shape placed at `origin`.
    pub fn resolve(&self, origin: Point) -> Point {
        origin + self.offset()
    }
}

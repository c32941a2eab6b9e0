//! Handle definitions for anchor affordances.

use crate::input::AnchorRef;
use crate::shapes::AnchorKind;
use kurbo::{Circle, Point};

/// A connection point drawn as a circle on top of its shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorHandle {
    /// The anchor this handle stands for.
    pub anchor: AnchorRef,
    pub kind: AnchorKind,
    /// Position in canvas coordinates.
    pub position: Point,
    pub radius: f64,
    pub hovered: bool,
}

impl AnchorHandle {
    /// Circle for the renderer.
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Check if a point (in canvas coordinates) hits this handle.
    pub fn hit_test(&self, point: Point) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

//! Placed shapes and the connector bindings they own.

use super::icon::ShapeType;
use super::{LineId, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Which end of a line a connector binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorRole {
    Start,
    End,
}

/// Binding of one line endpoint to one anchor of the owning shape instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRef {
    pub line_id: LineId,
    /// Index into the owning instance's `shape_type().anchors`.
    pub anchor_index: usize,
    pub role: ConnectorRole,
}

/// A shape type placed on the canvas.
#[derive(Debug, Clone)]
pub struct ShapeInstance {
    pub(crate) id: ShapeId,
    shape_type: Arc<ShapeType>,
    /// Canvas position of the shape's local origin.
    pub position: Point,
    connectors: Vec<ConnectorRef>,
}

impl ShapeInstance {
    /// Create an unconnected instance of `shape_type` at `position`.
    pub fn new(shape_type: Arc<ShapeType>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape_type,
            position,
            connectors: Vec::new(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn shape_type(&self) -> &Arc<ShapeType> {
        &self.shape_type
    }

    /// Connector bindings in registration order.
    pub fn connectors(&self) -> &[ConnectorRef] {
        &self.connectors
    }

    pub fn anchor_count(&self) -> usize {
        self.shape_type.anchors.len()
    }

    /// Absolute canvas position of an anchor.
    ///
    /// Anchor indices are only produced by enumerating the shape type's
    /// anchors, so `None` means a caller bypassed that contract.
    pub fn anchor_position(&self, index: usize) -> Option<Point> {
        let anchor = self.shape_type.anchor(index);
        debug_assert!(
            anchor.is_some(),
            "anchor index {index} out of range for {:?}",
            self.shape_type.name
        );
        anchor.map(|a| a.resolve(self.position))
    }

    /// All anchor positions, paired with their index.
    pub fn anchor_positions(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.shape_type
            .anchors
            .iter()
            .enumerate()
            .map(|(i, a)| (i, a.resolve(self.position)))
    }

    /// Bounding box of the icon on the canvas.
    pub fn bounds(&self) -> Rect {
        self.shape_type.bounds_at(self.position)
    }

    pub(crate) fn add_connector(&mut self, connector: ConnectorRef) {
        debug_assert!(connector.anchor_index < self.anchor_count());
        self.connectors.push(connector);
    }

    /// Drop every binding to `line_id`. Returns how many were removed.
    pub(crate) fn remove_connectors_for(&mut self, line_id: LineId) -> usize {
        let before = self.connectors.len();
        self.connectors.retain(|c| c.line_id != line_id);
        before - self.connectors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{AnchorKind, AnchorSpec};

    fn valve() -> Arc<ShapeType> {
        Arc::new(
            ShapeType::new("Valve", "M 0 0 L 20 10", 20.0, 10.0)
                .with_anchor(AnchorSpec::new(AnchorKind::In, 0.0, 5.0))
                .with_anchor(AnchorSpec::new(AnchorKind::Out, 20.0, 5.0)),
        )
    }

    #[test]
    fn test_anchor_position_follows_instance() {
        let mut inst = ShapeInstance::new(valve(), Point::new(100.0, 100.0));
        assert_eq!(inst.anchor_position(1), Some(Point::new(120.0, 105.0)));

        inst.position = Point::new(0.0, 0.0);
        assert_eq!(inst.anchor_position(0), Some(Point::new(0.0, 5.0)));
    }

    #[test]
    fn test_anchor_positions_enumerates_all() {
        let inst = ShapeInstance::new(valve(), Point::new(10.0, 10.0));
        let positions: Vec<_> = inst.anchor_positions().collect();
        assert_eq!(
            positions,
            vec![(0, Point::new(10.0, 15.0)), (1, Point::new(30.0, 15.0))]
        );
    }

    #[test]
    fn test_bounds() {
        let inst = ShapeInstance::new(valve(), Point::new(10.0, 20.0));
        assert_eq!(inst.bounds(), Rect::new(10.0, 20.0, 30.0, 30.0));
    }

    #[test]
    fn test_remove_connectors_for_line() {
        let mut inst = ShapeInstance::new(valve(), Point::ZERO);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        inst.add_connector(ConnectorRef { line_id: a, anchor_index: 0, role: ConnectorRole::End });
        inst.add_connector(ConnectorRef { line_id: b, anchor_index: 1, role: ConnectorRole::Start });

        assert_eq!(inst.remove_connectors_for(a), 1);
        assert_eq!(inst.connectors().len(), 1);
        assert_eq!(inst.connectors()[0].line_id, b);
        assert_eq!(inst.remove_connectors_for(a), 0);
    }
}

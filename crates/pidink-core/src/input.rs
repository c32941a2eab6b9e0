//! Gestures delivered by the rendering layer.
//!
//! The renderer owns hit-testing and raw pointer/touch events. It translates
//! them into [`Gesture`] values, one gesture at a time, in the order
//! down → move → up.

use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One anchor of one placed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorRef {
    pub shape: ShapeId,
    pub anchor_index: usize,
}

impl AnchorRef {
    pub fn new(shape: ShapeId, anchor_index: usize) -> Self {
        Self { shape, anchor_index }
    }
}

/// Editor-level gesture, already resolved against what is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    /// Pointer pressed on an anchor (mouse down / touch start).
    AnchorPress(AnchorRef),
    /// Pointer released over an anchor (mouse up / touch end).
    AnchorRelease(AnchorRef),
    /// Pointer entered an anchor.
    AnchorEnter(AnchorRef),
    /// Pointer left an anchor.
    AnchorLeave(AnchorRef),
    /// Pointer moved anywhere on the canvas.
    PointerMove { position: Point },
    /// Click or tap on a shape body.
    ShapeTap(ShapeId),
    /// Double click or double tap on a shape body.
    ShapeDoubleTap(ShapeId),
    /// Pointer pressed on a shape body.
    ShapePress(ShapeId),
    /// Pointer hovering a shape body.
    ShapeHover(ShapeId),
    /// Shape dragged so its origin is now at `position`.
    ShapeDrag { shape: ShapeId, position: Point },
    /// Drag of a shape finished.
    ShapeDragEnd(ShapeId),
    /// Click, tap or release on empty canvas.
    CanvasRelease { position: Point },
}

impl Gesture {
    /// Shape targeted by this gesture, if any.
    pub fn target_shape(&self) -> Option<ShapeId> {
        match self {
            Gesture::AnchorPress(a)
            | Gesture::AnchorRelease(a)
            | Gesture::AnchorEnter(a)
            | Gesture::AnchorLeave(a) => Some(a.shape),
            Gesture::ShapeTap(id)
            | Gesture::ShapeDoubleTap(id)
            | Gesture::ShapePress(id)
            | Gesture::ShapeHover(id)
            | Gesture::ShapeDragEnd(id) => Some(*id),
            Gesture::ShapeDrag { shape, .. } => Some(*shape),
            Gesture::PointerMove { .. } | Gesture::CanvasRelease { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_target_shape() {
        let id = Uuid::new_v4();
        assert_eq!(Gesture::AnchorPress(AnchorRef::new(id, 2)).target_shape(), Some(id));
        assert_eq!(
            Gesture::ShapeDrag { shape: id, position: Point::ZERO }.target_shape(),
            Some(id)
        );
        assert_eq!(Gesture::PointerMove { position: Point::ZERO }.target_shape(), None);
        assert_eq!(Gesture::CanvasRelease { position: Point::ZERO }.target_shape(), None);
    }
}

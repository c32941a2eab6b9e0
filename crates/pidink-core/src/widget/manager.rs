//! Widget manager for anchor affordances and resize selection.

use super::handles::AnchorHandle;
use crate::canvas::CanvasDocument;
use crate::config::AnchorStyle;
use crate::input::AnchorRef;
use crate::shapes::ShapeId;
use kurbo::Point;

/// Tracks UI state layered over the document.
///
/// Only one shape shows its anchors at a time; showing another replaces it.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    /// Shape whose anchors are displayed.
    anchors_shown: Option<ShapeId>,
    /// Anchor under the pointer.
    hovered: Option<AnchorRef>,
    /// Shape attached to the resize transformer.
    resize_target: Option<ShapeId>,
}

impl WidgetManager {
    /// Create a new widget manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape whose anchors are displayed, if any.
    pub fn anchors_shown(&self) -> Option<ShapeId> {
        self.anchors_shown
    }

    /// Display the anchors of `id`, hiding any others.
    pub fn show_anchors(&mut self, id: ShapeId) {
        if self.anchors_shown != Some(id) {
            self.hovered = None;
        }
        self.anchors_shown = Some(id);
    }

    /// Hide all anchors. Returns true if any were shown.
    pub fn clear_anchors(&mut self) -> bool {
        self.hovered = None;
        self.anchors_shown.take().is_some()
    }

    pub fn hovered_anchor(&self) -> Option<AnchorRef> {
        self.hovered
    }

    /// Enlarge an anchor under the pointer. Only displayed anchors react.
    pub fn hover_anchor(&mut self, anchor: AnchorRef) -> bool {
        if self.anchors_shown != Some(anchor.shape) || self.hovered == Some(anchor) {
            return false;
        }
        self.hovered = Some(anchor);
        true
    }

    /// Restore an anchor the pointer left.
    pub fn leave_anchor(&mut self, anchor: AnchorRef) -> bool {
        if self.hovered == Some(anchor) {
            self.hovered = None;
            true
        } else {
            false
        }
    }

    pub fn resize_target(&self) -> Option<ShapeId> {
        self.resize_target
    }

    pub fn set_resize_target(&mut self, id: ShapeId) {
        self.resize_target = Some(id);
    }

    pub fn clear_resize_target(&mut self) {
        self.resize_target = None;
    }

    /// Remove state for a deleted shape.
    pub fn remove(&mut self, id: ShapeId) {
        if self.anchors_shown == Some(id) {
            self.clear_anchors();
        }
        if self.resize_target == Some(id) {
            self.resize_target = None;
        }
    }

    /// Handles for the displayed anchors, in anchor order.
    pub fn anchor_handles(&self, document: &CanvasDocument, style: &AnchorStyle) -> Vec<AnchorHandle> {
        let Some(shape) = self.anchors_shown.and_then(|id| document.get_shape(id)) else {
            return Vec::new();
        };
        shape
            .shape_type()
            .anchors
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let anchor = AnchorRef::new(shape.id(), index);
                let hovered = self.hovered == Some(anchor);
                AnchorHandle {
                    anchor,
                    kind: spec.kind,
                    position: spec.resolve(shape.position),
                    radius: if hovered { style.radius_over } else { style.radius },
                    hovered,
                }
            })
            .collect()
    }

    /// Hit test the displayed anchors, topmost (last) first.
    pub fn anchor_at(&self, document: &CanvasDocument, style: &AnchorStyle, point: Point) -> Option<AnchorRef> {
        self.anchor_handles(document, style)
            .iter()
            .rev()
            .find(|h| h.hit_test(point))
            .map(|h| h.anchor)
    }
}

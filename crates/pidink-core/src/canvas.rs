//! Canvas document and state management.

use crate::config::EditorConfig;
use crate::elbow::{reroute_end, reroute_start};
use crate::error::{EditorError, EditorResult};
use crate::input::{AnchorRef, Gesture};
use crate::shapes::{
    ConnectorRef, ConnectorRole, Line, LineId, ShapeId, ShapeInstance, ShapeType,
};
use crate::storage::{Diagram, DiagramEntry};
use crate::tools::{Commit, ConnectionSession};
use crate::widget::{AnchorHandle, WidgetManager};
use kurbo::{Point, Rect};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// All placed shapes and committed lines.
///
/// Shapes are kept in an arena keyed by [`ShapeId`]; renderers hold ids only.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    shapes: HashMap<ShapeId, ShapeInstance>,
    /// Z-order of shapes (back to front), which is also placement order.
    z_order: Vec<ShapeId>,
    /// Committed lines, keyed by ID.
    lines: HashMap<LineId, Line>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the others.
    pub fn add_shape(&mut self, shape: ShapeInstance) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape together with every line bound to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<ShapeInstance> {
        let shape = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);
        for connector in shape.connectors() {
            self.lines.remove(&connector.line_id);
            for other in self.shapes.values_mut() {
                other.remove_connectors_for(connector.line_id);
            }
        }
        Some(shape)
    }

    /// Clear all shapes and lines.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.lines.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&ShapeInstance> {
        self.shapes.get(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &ShapeInstance> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Z-order of shapes (back to front).
    pub fn z_order(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Bring a shape to the front (topmost).
    pub fn bring_to_front(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.z_order.retain(|&shape_id| shape_id != id);
            self.z_order.push(id);
        }
    }

    /// Get a committed line by ID.
    pub fn get_line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Committed lines, in no particular order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Absolute position of an anchor, if both the shape and anchor exist.
    pub fn anchor_position(&self, anchor: AnchorRef) -> Option<Point> {
        let shape = self.shapes.get(&anchor.shape)?;
        if anchor.anchor_index >= shape.anchor_count() {
            return None;
        }
        shape.anchor_position(anchor.anchor_index)
    }

    /// Shapes owning each end of a line, as `(start, end)`.
    pub fn line_endpoints(&self, line_id: LineId) -> (Option<AnchorRef>, Option<AnchorRef>) {
        let mut start = None;
        let mut end = None;
        for shape in self.shapes.values() {
            for c in shape.connectors().iter().filter(|c| c.line_id == line_id) {
                let anchor = AnchorRef::new(shape.id(), c.anchor_index);
                match c.role {
                    ConnectorRole::Start => start = Some(anchor),
                    ConnectorRole::End => end = Some(anchor),
                }
            }
        }
        (start, end)
    }

    /// Store a committed line and register its two connectors.
    pub(crate) fn connect(&mut self, line: Line, start: AnchorRef, end: AnchorRef) -> Option<LineId> {
        if self.anchor_position(start).is_none() || self.anchor_position(end).is_none() {
            return None;
        }
        let line_id = line.id();
        for (anchor, role) in [(end, ConnectorRole::End), (start, ConnectorRole::Start)] {
            if let Some(shape) = self.shapes.get_mut(&anchor.shape) {
                shape.add_connector(ConnectorRef {
                    line_id,
                    anchor_index: anchor.anchor_index,
                    role,
                });
            }
        }
        self.lines.insert(line_id, line);
        Some(line_id)
    }

    /// Move a shape and re-route every line bound to it.
    ///
    /// Called for every intermediate drag position. Lines ending on the shape
    /// are routed fresh from their fixed start; lines starting on it keep their
    /// end and its corner height.
    pub fn move_shape(&mut self, id: ShapeId, position: Point) -> bool {
        if !position.is_finite() {
            log::warn!("Ignoring move of {} to non-finite position {:?}", id, position);
            return false;
        }
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.position = position;

        let shape = &self.shapes[&id];
        for connector in shape.connectors() {
            let Some(anchor) = shape.anchor_position(connector.anchor_index) else {
                continue;
            };
            let Some(line) = self.lines.get_mut(&connector.line_id) else {
                continue;
            };
            let points = match connector.role {
                ConnectorRole::End => reroute_end(line.points(), anchor),
                ConnectorRole::Start => reroute_start(line.points(), anchor),
            };
            line.set_points(points);
        }
        true
    }

    /// Snapshot of placed shapes in z-order. Lines are not included.
    pub fn export(&self) -> Diagram {
        self.shapes_ordered()
            .map(|shape| DiagramEntry {
                pid_shape: shape.shape_type().as_ref().clone(),
                position: shape.position,
            })
            .collect()
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(ShapeInstance::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Subscribers notified after structural changes.
#[derive(Default)]
struct ChangeListeners(Vec<Box<dyn FnMut()>>);

impl ChangeListeners {
    fn notify(&mut self) {
        for listener in &mut self.0 {
            listener();
        }
    }
}

impl fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangeListeners({})", self.0.len())
    }
}

/// Runtime editor state for one diagram.
#[derive(Debug)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Line drawing state.
    pub session: ConnectionSession,
    /// Anchor affordances and resize selection.
    pub widgets: WidgetManager,
    config: EditorConfig,
    listeners: ChangeListeners,
}

impl Canvas {
    /// Create an editor. Fails if a required mount point is missing.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        log::info!("Mounting editor into {:?}", config.container);
        Ok(Self {
            document: CanvasDocument::new(),
            session: ConnectionSession::new(),
            widgets: WidgetManager::new(),
            config,
            listeners: ChangeListeners::default(),
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Subscribe to "diagram changed" notifications. Subscribers run in
    /// subscription order.
    pub fn on_change(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.0.push(Box::new(listener));
    }

    /// Place a shape with its origin at `position`.
    pub fn place_shape(&mut self, shape_type: Arc<ShapeType>, position: Point) -> ShapeId {
        let id = self.document.add_shape(ShapeInstance::new(shape_type, position));
        log::debug!("Placed shape {} at {:?}", id, position);
        self.listeners.notify();
        id
    }

    /// Delete a shape, its lines, and a pending line started from it.
    pub fn delete_shape(&mut self, id: ShapeId) -> EditorResult<()> {
        self.document
            .remove_shape(id)
            .ok_or(EditorError::UnknownShape(id))?;
        self.session.discard_if_started_on(id);
        self.widgets.remove(id);
        log::debug!("Deleted shape {}", id);
        self.listeners.notify();
        Ok(())
    }

    /// Apply one gesture. Returns true if editor state changed.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> bool {
        if let Some(shape) = gesture.target_shape() {
            if self.document.get_shape(shape).is_none() {
                log::debug!("Ignoring {:?} on unknown shape", gesture);
                return false;
            }
        }

        match gesture {
            Gesture::AnchorPress(anchor) => self.session.begin(&self.document, anchor),
            Gesture::AnchorRelease(anchor) => {
                let committed = self.session.commit_to_anchor(&mut self.document, anchor);
                self.finish_commit(committed)
            }
            Gesture::AnchorEnter(anchor) => self.widgets.hover_anchor(anchor),
            Gesture::AnchorLeave(anchor) => self.widgets.leave_anchor(anchor),
            Gesture::PointerMove { position } => self.session.update(position),
            Gesture::ShapeTap(id) => {
                self.widgets.clear_resize_target();
                self.widgets.show_anchors(id);
                true
            }
            Gesture::ShapeHover(id) => {
                if self.session.is_pending() {
                    self.widgets.show_anchors(id);
                    true
                } else {
                    false
                }
            }
            Gesture::ShapePress(_) => self.widgets.clear_anchors(),
            Gesture::ShapeDoubleTap(id) => {
                self.widgets.clear_anchors();
                self.widgets.set_resize_target(id);
                self.document.bring_to_front(id);
                true
            }
            Gesture::ShapeDrag { shape, position } => self.document.move_shape(shape, position),
            Gesture::ShapeDragEnd(_) => {
                self.listeners.notify();
                true
            }
            Gesture::CanvasRelease { position } => {
                if self.session.is_pending() {
                    let committed = self.session.commit_to_canvas(&mut self.document, position);
                    self.finish_commit(committed)
                } else {
                    self.widgets.clear_resize_target();
                    self.widgets.clear_anchors();
                    true
                }
            }
        }
    }

    fn finish_commit(&mut self, commit: Option<Commit>) -> bool {
        let Some(commit) = commit else {
            return false;
        };
        self.widgets.clear_anchors();
        if commit.terminator.is_some() {
            self.listeners.notify();
        }
        true
    }

    /// Anchor circles the renderer should draw.
    pub fn anchor_handles(&self) -> Vec<AnchorHandle> {
        self.widgets.anchor_handles(&self.document, &self.config.anchor)
    }

    /// Displayed anchor under `point`, if any.
    pub fn anchor_at(&self, point: Point) -> Option<AnchorRef> {
        self.widgets.anchor_at(&self.document, &self.config.anchor, point)
    }

    /// Snapshot of placed shapes for persistence.
    pub fn export(&self) -> Diagram {
        self.document.export()
    }

    /// Place every entry of `diagram`, in order, as if placed interactively.
    /// `None` means there is nothing to restore.
    pub fn import(&mut self, diagram: Option<Diagram>) {
        let Some(diagram) = diagram else {
            return;
        };
        log::info!("Importing {} shapes", diagram.len());
        for entry in diagram {
            self.place_shape(Arc::new(entry.pid_shape), entry.position);
        }
    }

    /// Import from JSON text. Unparsable data is treated as no diagram.
    pub fn import_json(&mut self, json: &str) {
        match Diagram::from_json(json) {
            Ok(diagram) => self.import(Some(diagram)),
            Err(e) => log::warn!("Ignoring unreadable diagram data: {}", e),
        }
    }
}

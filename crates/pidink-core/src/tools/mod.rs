//! Connection tool: drawing a line from one anchor to another.
//!
//! The session is either idle or holds exactly one pending line. The pending
//! line lives inside the session itself, so a second one cannot exist.

use crate::canvas::CanvasDocument;
use crate::elbow::compute_elbow_path;
use crate::input::AnchorRef;
use crate::shapes::{Line, LineId, LineState, ShapeId, ShapeInstance, ShapeType};
use kurbo::Point;
use std::sync::Arc;

/// State of the connection tool.
#[derive(Debug, Clone, Default)]
pub enum ConnectionState {
    /// No line is being drawn.
    #[default]
    Idle,
    /// A line is being drawn from `start`.
    Pending {
        /// The line being drawn. Its first point is the start anchor.
        line: Line,
        /// Deferred start binding, registered on commit.
        start: AnchorRef,
    },
}

/// Outcome of committing a pending line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub line: LineId,
    pub start: AnchorRef,
    pub end: AnchorRef,
    /// Terminator placed for a release on empty canvas.
    pub terminator: Option<ShapeId>,
}

/// Tracks the in-progress connection for one editor.
#[derive(Debug, Clone)]
pub struct ConnectionSession {
    state: ConnectionState,
    terminator: Arc<ShapeType>,
}

impl Default for ConnectionSession {
    fn default() -> Self {
        Self {
            state: ConnectionState::Idle,
            terminator: Arc::new(ShapeType::terminator()),
        }
    }
}

impl ConnectionSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Check if a line is being drawn.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ConnectionState::Pending { .. })
    }

    /// The line being drawn, if any.
    pub fn pending_line(&self) -> Option<&Line> {
        match &self.state {
            ConnectionState::Pending { line, .. } => Some(line),
            ConnectionState::Idle => None,
        }
    }

    /// Anchor the pending line starts from, if any.
    pub fn pending_start(&self) -> Option<AnchorRef> {
        match &self.state {
            ConnectionState::Pending { start, .. } => Some(*start),
            ConnectionState::Idle => None,
        }
    }

    /// Shape type used for lines released on empty canvas.
    pub fn terminator_type(&self) -> &Arc<ShapeType> {
        &self.terminator
    }

    /// Start drawing from `anchor`.
    ///
    /// Ignored while another line is pending or when the anchor does not exist.
    pub fn begin(&mut self, document: &CanvasDocument, anchor: AnchorRef) -> bool {
        if self.is_pending() {
            log::debug!("Ignoring connection start: a line is already pending");
            return false;
        }
        let Some(position) = document.anchor_position(anchor) else {
            log::warn!("Ignoring connection start at unknown anchor {:?}", anchor);
            return false;
        };
        let line = Line::pending(position);
        log::debug!("Connection {} started at {:?}", line.id(), position);
        self.state = ConnectionState::Pending { line, start: anchor };
        true
    }

    /// Re-route the pending line toward the pointer.
    pub fn update(&mut self, pointer: Point) -> bool {
        if !pointer.is_finite() {
            log::warn!("Ignoring non-finite pointer position {:?}", pointer);
            return false;
        }
        if let ConnectionState::Pending { line, .. } = &mut self.state {
            let Some(start) = line.start() else {
                return false;
            };
            line.set_points(compute_elbow_path(start, pointer));
            true
        } else {
            false
        }
    }

    /// Finish the pending line on `target`.
    ///
    /// Ignored when idle, when the target anchor does not exist, or when the
    /// target is on the shape the line started from.
    pub fn commit_to_anchor(
        &mut self,
        document: &mut CanvasDocument,
        target: AnchorRef,
    ) -> Option<Commit> {
        let start = self.pending_start()?;
        if target.shape == start.shape {
            log::debug!("Ignoring release on the starting shape");
            return None;
        }
        let Some(end_pos) = document.anchor_position(target) else {
            log::warn!("Ignoring release on unknown anchor {:?}", target);
            return None;
        };
        if document.anchor_position(start).is_none() {
            log::warn!("Start shape of pending line is gone; discarding it");
            self.state = ConnectionState::Idle;
            return None;
        }

        let ConnectionState::Pending { mut line, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let start_pos = line.start().unwrap_or(end_pos);
        line.set_points(compute_elbow_path(start_pos, end_pos));
        line.state = LineState::Committed;
        let id = document.connect(line, start, target)?;
        log::debug!("Connection {} committed to {:?}", id, target);
        Some(Commit {
            line: id,
            start,
            end: target,
            terminator: None,
        })
    }

    /// Finish the pending line on empty canvas by placing a terminator whose
    /// first anchor lands on `position` and binding the line to that anchor.
    pub fn commit_to_canvas(
        &mut self,
        document: &mut CanvasDocument,
        position: Point,
    ) -> Option<Commit> {
        if !self.is_pending() || !position.is_finite() {
            return None;
        }
        let offset = self.terminator.anchor(0).map(|a| a.offset()).unwrap_or_default();
        let terminator = ShapeInstance::new(self.terminator.clone(), position - offset);
        let terminator_id = document.add_shape(terminator);
        log::debug!("Placed terminator {} at {:?}", terminator_id, position);

        match self.commit_to_anchor(document, AnchorRef::new(terminator_id, 0)) {
            Some(commit) => Some(Commit {
                terminator: Some(terminator_id),
                ..commit
            }),
            None => {
                document.remove_shape(terminator_id);
                None
            }
        }
    }

    /// Drop the pending line if it starts on `shape`.
    pub fn discard_if_started_on(&mut self, shape: ShapeId) -> bool {
        if self.pending_start().is_some_and(|s| s.shape == shape) {
            log::debug!("Discarding pending line from deleted shape {}", shape);
            self.state = ConnectionState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{AnchorKind, AnchorSpec, ConnectorRole};

    fn nozzle() -> Arc<ShapeType> {
        Arc::new(
            ShapeType::new("Nozzle", "M 0 0 L 10 0", 10.0, 10.0)
                .with_anchor(AnchorSpec::new(AnchorKind::InOut, 0.0, 0.0)),
        )
    }

    fn two_shapes() -> (CanvasDocument, ShapeId, ShapeId) {
        let mut doc = CanvasDocument::new();
        let a = doc.add_shape(ShapeInstance::new(nozzle(), Point::new(100.0, 100.0)));
        let b = doc.add_shape(ShapeInstance::new(nozzle(), Point::new(300.0, 100.0)));
        (doc, a, b)
    }

    #[test]
    fn test_begin_creates_single_point_line() {
        let (doc, a, _) = two_shapes();
        let mut session = ConnectionSession::new();

        assert!(session.begin(&doc, AnchorRef::new(a, 0)));
        assert!(session.is_pending());
        assert_eq!(session.pending_line().unwrap().points(), &[Point::new(100.0, 100.0)]);
        // Nothing registered until commit.
        assert!(doc.get_shape(a).unwrap().connectors().is_empty());
    }

    #[test]
    fn test_second_begin_is_noop() {
        let (doc, a, b) = two_shapes();
        let mut session = ConnectionSession::new();

        session.begin(&doc, AnchorRef::new(a, 0));
        session.update(Point::new(250.0, 80.0));
        let line_id = session.pending_line().unwrap().id();
        let points = session.pending_line().unwrap().points().to_vec();

        assert!(!session.begin(&doc, AnchorRef::new(b, 0)));
        assert_eq!(session.pending_line().unwrap().id(), line_id);
        assert_eq!(session.pending_line().unwrap().points(), points.as_slice());
        assert_eq!(session.pending_start(), Some(AnchorRef::new(a, 0)));
    }

    #[test]
    fn test_begin_on_unknown_anchor() {
        let (doc, a, _) = two_shapes();
        let mut session = ConnectionSession::new();
        assert!(!session.begin(&doc, AnchorRef::new(a, 3)));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_update_routes_to_pointer() {
        let (doc, a, _) = two_shapes();
        let mut session = ConnectionSession::new();
        assert!(!session.update(Point::new(1.0, 1.0)));

        session.begin(&doc, AnchorRef::new(a, 0));
        assert!(session.update(Point::new(300.0, 100.0)));
        assert_eq!(
            session.pending_line().unwrap().points(),
            &[
                Point::new(100.0, 100.0),
                Point::new(200.0, 100.0),
                Point::new(200.0, 100.0),
                Point::new(300.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_commit_to_anchor() {
        let (mut doc, a, b) = two_shapes();
        let mut session = ConnectionSession::new();

        session.begin(&doc, AnchorRef::new(a, 0));
        session.update(Point::new(280.0, 90.0));
        let commit = session.commit_to_anchor(&mut doc, AnchorRef::new(b, 0)).unwrap();

        assert!(!session.is_pending());
        assert_eq!(commit.terminator, None);

        let line = doc.get_line(commit.line).unwrap();
        assert_eq!(line.state, LineState::Committed);
        assert_eq!(line.end(), Some(Point::new(300.0, 100.0)));

        let a_refs = doc.get_shape(a).unwrap().connectors();
        let b_refs = doc.get_shape(b).unwrap().connectors();
        assert_eq!(a_refs.len(), 1);
        assert_eq!(b_refs.len(), 1);
        assert_eq!(a_refs[0].role, ConnectorRole::Start);
        assert_eq!(b_refs[0].role, ConnectorRole::End);
        assert_eq!(a_refs[0].line_id, commit.line);
        assert_eq!(b_refs[0].line_id, commit.line);
    }

    #[test]
    fn test_commit_when_idle() {
        let (mut doc, _, b) = two_shapes();
        let mut session = ConnectionSession::new();
        assert!(session.commit_to_anchor(&mut doc, AnchorRef::new(b, 0)).is_none());
        assert!(session.commit_to_canvas(&mut doc, Point::new(5.0, 5.0)).is_none());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_release_on_start_shape_keeps_pending() {
        let (mut doc, a, _) = two_shapes();
        let mut session = ConnectionSession::new();

        session.begin(&doc, AnchorRef::new(a, 0));
        assert!(session.commit_to_anchor(&mut doc, AnchorRef::new(a, 0)).is_none());
        assert!(session.is_pending());
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_commit_to_canvas_places_terminator() {
        let (mut doc, a, _) = two_shapes();
        let mut session = ConnectionSession::new();

        session.begin(&doc, AnchorRef::new(a, 0));
        session.update(Point::new(160.0, 200.0));
        let commit = session.commit_to_canvas(&mut doc, Point::new(160.0, 200.0)).unwrap();

        let terminator = commit.terminator.unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(commit.end, AnchorRef::new(terminator, 0));

        let term = doc.get_shape(terminator).unwrap();
        assert!(term.shape_type().is_terminator());
        assert_eq!(term.connectors().len(), 1);
        assert_eq!(term.connectors()[0].role, ConnectorRole::End);

        let line = doc.get_line(commit.line).unwrap();
        assert_eq!(line.end(), Some(Point::new(160.0, 200.0)));
        assert_eq!(doc.anchor_position(commit.end), Some(Point::new(160.0, 200.0)));
        assert!(term.bounds().contains(Point::new(163.0, 200.0)));
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let (mut doc, a, _) = two_shapes();
        let mut session = ConnectionSession::new();
        session.begin(&doc, AnchorRef::new(a, 0));
        session.update(Point::new(250.0, 80.0));
        let before = session.pending_line().unwrap().points().to_vec();

        assert!(!session.update(Point::new(f64::NAN, 10.0)));
        assert!(!session.update(Point::new(f64::INFINITY, 10.0)));
        assert_eq!(session.pending_line().unwrap().points(), before.as_slice());

        assert!(session.commit_to_canvas(&mut doc, Point::new(f64::NAN, 0.0)).is_none());
        assert!(session.is_pending());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_discard_if_started_on() {
        let (doc, a, b) = two_shapes();
        let mut session = ConnectionSession::new();
        session.begin(&doc, AnchorRef::new(a, 0));

        assert!(!session.discard_if_started_on(b));
        assert!(session.is_pending());
        assert!(session.discard_if_started_on(a));
        assert!(!session.is_pending());
    }
}

//! Connecting line shape.

use super::{LineId, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineState {
    /// Being drawn: the start is bound, the end follows the pointer.
    #[default]
    Pending,
    /// Both endpoints are bound to anchors.
    Committed,
}

/// An orthogonal polyline between two anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: LineId,
    points: Vec<Point>,
    pub state: LineState,
}

impl Line {
    /// Start a pending line at `start`.
    pub fn pending(start: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            state: LineState::Pending,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    /// Points in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Replace the geometry in place.
    pub fn set_points(&mut self, points: impl Into<Vec<Point>>) {
        self.points = points.into();
        debug_assert!(crate::elbow::is_orthogonal(&self.points));
    }

    pub fn is_pending(&self) -> bool {
        self.state == LineState::Pending
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Bounding box of all points.
    pub fn bounds(&self) -> Rect {
        let (min_x, max_x) = self.points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.x), mx.max(p.x))
        });
        let (min_y, max_y) = self.points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
            (mn.min(p.y), mx.max(p.y))
        });
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Check if a point is within `tolerance` of the line.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance(point) <= tolerance,
            pts => point_to_polyline_dist(point, pts) <= tolerance,
        }
    }

    /// Path for the renderer.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut pts = self.points.iter();
        if let Some(first) = pts.next() {
            path.move_to(*first);
            for p in pts {
                path.line_to(*p);
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elbow::compute_elbow_path;

    #[test]
    fn test_pending_line() {
        let line = Line::pending(Point::new(100.0, 100.0));
        assert!(line.is_pending());
        assert_eq!(line.points(), &[Point::new(100.0, 100.0)]);
        assert_eq!(line.start(), line.end());
    }

    #[test]
    fn test_set_points() {
        let mut line = Line::pending(Point::new(0.0, 0.0));
        line.set_points(compute_elbow_path(Point::new(0.0, 0.0), Point::new(100.0, 50.0)));
        assert_eq!(line.points().len(), 4);
        assert_eq!(line.end(), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_bounds() {
        let mut line = Line::pending(Point::new(10.0, 20.0));
        line.set_points(compute_elbow_path(Point::new(10.0, 20.0), Point::new(50.0, 80.0)));
        let bounds = line.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_segments() {
        let mut line = Line::pending(Point::new(0.0, 0.0));
        line.set_points(compute_elbow_path(Point::new(0.0, 0.0), Point::new(100.0, 100.0)));
        // On the vertical run at x = 50.
        assert!(line.hit_test(Point::new(51.0, 40.0), 2.0));
        assert!(line.hit_test(Point::new(80.0, 100.0), 0.5));
        assert!(!line.hit_test(Point::new(20.0, 60.0), 5.0));
    }

    #[test]
    fn test_to_path_elements() {
        let mut line = Line::pending(Point::new(0.0, 0.0));
        line.set_points(compute_elbow_path(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
        assert_eq!(line.to_path().elements().len(), 4);
    }
}

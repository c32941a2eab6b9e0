//! Orthogonal (elbow) routing between two endpoints.
//!
//! Every routed line is a fixed "Z": a horizontal run out of the start, a
//! vertical run at the horizontal midpoint, and a horizontal run into the end.

use kurbo::Point;

/// Number of points in a routed path.
pub const ROUTE_LEN: usize = 4;

/// Route a line from `start` to `end` with right-angle corners.
///
/// Returns `[start, (mid_x, start.y), (mid_x, end.y), end]` where `mid_x` is
/// the average of the endpoint x coordinates. Coincident endpoints give a
/// zero-length path.
pub fn compute_elbow_path(start: Point, end: Point) -> [Point; ROUTE_LEN] {
    let mid_x = (start.x + end.x) / 2.0;
    [
        start,
        Point::new(mid_x, start.y),
        Point::new(mid_x, end.y),
        end,
    ]
}

/// Re-route after the line's end moved. The start stays fixed.
pub fn reroute_end(existing: &[Point], new_end: Point) -> [Point; ROUTE_LEN] {
    let start = existing.first().copied().unwrap_or(new_end);
    compute_elbow_path(start, new_end)
}

/// Re-route after the line's start moved.
///
/// Unlike [`reroute_end`] this keeps the existing end point and the end-side
/// corner height: the path becomes
/// `[new_start, (mid_x, new_start.y), (mid_x, old_end.y), old_end]`.
pub fn reroute_start(existing: &[Point], new_start: Point) -> [Point; ROUTE_LEN] {
    let old_end = existing.last().copied().unwrap_or(new_start);
    let mid_x = (new_start.x + old_end.x) / 2.0;
    [
        new_start,
        Point::new(mid_x, new_start.y),
        Point::new(mid_x, old_end.y),
        old_end,
    ]
}

/// Check that consecutive points only differ along one axis.
pub fn is_orthogonal(points: &[Point]) -> bool {
    points
        .windows(2)
        .all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
}

//! Pixel-space geometry used by the snake tracker
//!
//! Points are integer frame coordinates, distances are `f64`. The signed
//! distance follows the usual point-in-polygon convention: positive inside,
//! negative outside, zero on an edge.

use serde::{Deserialize, Serialize};

use super::config::ContourMode;

/// A pixel position in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// Component-wise `b - a`, computed in `f64` so extreme coordinates cannot overflow
fn delta(a: Point, b: Point) -> (f64, f64) {
    (
        f64::from(b.x) - f64::from(a.x),
        f64::from(b.y) - f64::from(a.y),
    )
}

/// Squared distance from `p` to the segment `a`-`b`
fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = delta(a, b);
    let (apx, apy) = delta(a, p);
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return apx * apx + apy * apy;
    }

    let t = ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0);
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    dx * dx + dy * dy
}

/// Even-odd point-in-polygon test
fn is_inside(contour: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut prev = contour[contour.len() - 1];
    for &cur in contour {
        if (cur.y > p.y) != (prev.y > p.y) {
            let (dx, dy) = delta(cur, prev);
            let t = (f64::from(p.y) - f64::from(cur.y)) / dy;
            let x_cross = f64::from(cur.x) + t * dx;
            if f64::from(p.x) < x_cross {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

/// Signed distance from `p` to `contour`
///
/// Returns `None` for an empty contour. With [`ContourMode::Open`] the result
/// is never negative since an open polyline has no inside.
pub fn signed_distance(contour: &[Point], p: Point, mode: ContourMode) -> Option<f64> {
    let first = *contour.first()?;

    let mut min_sq = segment_distance_sq(p, first, first);
    for pair in contour.windows(2) {
        min_sq = min_sq.min(segment_distance_sq(p, pair[0], pair[1]));
    }

    match mode {
        ContourMode::Open => Some(min_sq.sqrt()),
        ContourMode::Closed => {
            let last = contour[contour.len() - 1];
            min_sq = min_sq.min(segment_distance_sq(p, last, first));
            if min_sq == 0.0 {
                return Some(0.0);
            }
            let dist = min_sq.sqrt();
            Some(if is_inside(contour, p) { dist } else { -dist })
        }
    }
}

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::utils::allocator::BodyId;

/// Integer coordinates of a broad-phase grid cell.
pub type CellCoord = (i32, i32);

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: Rect) -> Rect {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Rect {
            pos: min,
            size: max - min,
        }
    }

    /// Strict interior test; points on the boundary are outside.
    pub fn contains_point(&self, p: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        min.x < p.x && p.x < max.x && min.y < p.y && p.y < max.y
    }

    /// Per-axis nearest corner coordinate to `p`.
    pub fn nearest_corner(&self, p: Vec2) -> Vec2 {
        let min = self.min();
        let max = self.max();
        Vec2::new(nearest(p.x, min.x, max.x), nearest(p.y, min.y, max.y))
    }

    /// Minkowski difference of two rectangles, which is another rectangle.
    /// A displacement ray from the origin entering it means the two source
    /// rectangles touch at some point along the move.
    pub fn minkowski_diff(&self, other: Rect) -> Rect {
        Rect {
            pos: other.pos - self.pos - self.size,
            size: self.size + other.size,
        }
    }

    /// First intersection of the segment `origin → origin + delta` with this
    /// rectangle's boundary: the smallest fraction of `delta` together with
    /// the outward normal of the edge that was crossed.
    pub fn segment_intersection(&self, origin: Vec2, delta: Vec2) -> Option<(f32, Vec2)> {
        let min = self.min();
        let max = self.max();

        // Each edge carries a fixed outward normal.
        let edges = [
            (Vec2::new(-1.0, 0.0), min, Vec2::new(min.x, max.y)),
            (Vec2::new(0.0, 1.0), Vec2::new(min.x, max.y), max),
            (Vec2::new(1.0, 0.0), max, Vec2::new(max.x, min.y)),
            (Vec2::new(0.0, -1.0), Vec2::new(max.x, min.y), min),
        ];

        let mut best: Option<(f32, Vec2)> = None;
        for (normal, a, b) in edges {
            if let Some(fraction) = segment_fraction(origin, delta, a, b) {
                if best.is_none_or(|(t, _)| fraction < t) {
                    best = Some((fraction, normal));
                }
            }
        }
        best
    }
}

fn nearest(v: f32, a: f32, b: f32) -> f32 {
    if (a - v).abs() < (b - v).abs() {
        a
    } else {
        b
    }
}

/// Parametric segment/segment intersection. Returns the fraction of the first
/// segment at which it crosses the second, if both parameters land in [0, 1].
/// Parallel and colinear segments never intersect here.
fn segment_fraction(p: Vec2, r: Vec2, q1: Vec2, q2: Vec2) -> Option<f32> {
    let s = q2 - q1;
    let denominator = r.perp_dot(s);
    if denominator == 0.0 {
        return None;
    }

    let qp = q1 - p;
    let u = qp.perp_dot(r) / denominator;
    let t = qp.perp_dot(s) / denominator;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// One body-vs-body encounter produced by a sweep.
///
/// `intersection` is the fraction of the attempted move at which the two
/// bodies first touch; for bodies that already overlap at rest it is the
/// negative product of the clamped penetration depths. `distance` is the
/// squared center-to-center distance, used only to break ordering ties.
/// `touch` is the resolved contact point, nudged outward along `normal` so
/// the next sweep does not re-flag the pair as overlapping. `data` is a
/// free-form point stamped by the resolving response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub body: BodyId,
    pub response: String,
    pub intersection: f32,
    pub distance: f32,
    pub motion: Vec2,
    pub normal: Vec2,
    pub touch: Vec2,
    pub data: Vec2,
}

/// Orders collisions by intersection fraction, then squared distance, then
/// body id. The id fallback keeps exact float ties reproducible.
pub(crate) fn sort_collisions(collisions: &mut [Collision]) {
    collisions.sort_by(|a, b| {
        a.intersection
            .total_cmp(&b.intersection)
            .then(a.distance.total_cmp(&b.distance))
            .then(a.body.cmp(&b.body))
    });
}

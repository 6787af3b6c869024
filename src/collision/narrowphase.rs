use glam::Vec2;

use crate::config::TOUCH_NUDGE;
use crate::core::body::Body;
use crate::core::types::{Collision, Rect};

/// Bounding rectangle of a body's entire move: the union of its rectangle at
/// the start position and at the goal. Every point the body's edges can pass
/// through lies inside it, which is what makes the broad-phase query
/// tunneling-proof.
pub(crate) fn swept_bounds(size: Vec2, position: Vec2, goal: Vec2) -> Rect {
    Rect::from_pos_size(position, size).union(Rect::from_pos_size(goal, size))
}

/// Swept test of `body` (treated as being at `position`) moving to `goal`
/// against `other`. Returns the collision record, or `None` when the move
/// never touches `other`.
///
/// The test works in the coordinate frame of the Minkowski difference of the
/// two rectangles: the relative displacement becomes a ray from the origin,
/// and a hit on the difference rectangle means the original rectangles touch
/// at that fraction of the move.
pub(crate) fn collide(body: &Body, position: Vec2, other: &Body, goal: Vec2) -> Option<Collision> {
    if other.id() == body.id() {
        return None;
    }

    let motion = goal - position;
    let rect = Rect::from_pos_size(position, body.size());
    let diff = rect.minkowski_diff(other.rect());

    let (intersection, normal) = if diff.contains_point(Vec2::ZERO) && motion == Vec2::ZERO {
        resting_overlap(body.size(), &diff)
    } else {
        let (fraction, normal) = diff.segment_intersection(Vec2::ZERO, motion)?;
        (fraction, normal)
    };

    let touch = position + motion * intersection + normal * TOUCH_NUDGE;
    let distance = (rect.center() - other.rect().center()).length_squared();

    Some(Collision {
        body: other.id(),
        response: body.response_for(other.tag()).to_owned(),
        intersection,
        distance,
        motion,
        normal,
        touch,
        data: Vec2::ZERO,
    })
}

/// Already overlapping and not moving: resolve along the minimum
/// displacement vector. The axis with the smaller absolute penetration is
/// the separating axis; the intersection is recorded as the negative product
/// of the clamped penetration depths, which keeps resting overlaps ordered
/// ahead of every swept hit.
fn resting_overlap(size: Vec2, diff: &Rect) -> (f32, Vec2) {
    let corner = diff.nearest_corner(Vec2::ZERO);
    let intersection = -size.x.min(corner.x.abs()) * size.y.min(corner.y.abs());

    let (px, py) = if corner.x.abs() < corner.y.abs() {
        (corner.x, 0.0)
    } else {
        (0.0, corner.y)
    };
    (intersection, Vec2::new(sign(px), sign(py)))
}

fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_body(index: u32, tag: &str, rect: Rect) -> Body {
        let mut body = Body::new(tag.to_owned(), rect);
        body.id = crate::utils::allocator::BodyId::new(index, 0);
        body
    }

    #[test]
    fn head_on_sweep_reports_entry_fraction_and_normal() {
        let mover = make_body(0, "player", Rect::new(0.0, 0.0, 32.0, 32.0));
        let wall = make_body(1, "wall", Rect::new(64.0, 0.0, 64.0, 64.0));

        let col = collide(&mover, mover.position(), &wall, Vec2::new(200.0, 0.0))
            .expect("mover passes through the wall");

        // Right edge reaches the wall's left edge after 32 of 200 units.
        assert_relative_eq!(col.intersection, 0.16, epsilon = 1e-6);
        assert_eq!(col.normal, Vec2::new(-1.0, 0.0));
        assert_relative_eq!(col.touch.x, 32.0 - TOUCH_NUDGE, epsilon = 1e-4);
        assert_relative_eq!(col.touch.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn sweep_past_a_disjoint_body_misses() {
        let mover = make_body(0, "player", Rect::new(0.0, 0.0, 32.0, 32.0));
        let wall = make_body(1, "wall", Rect::new(64.0, 100.0, 64.0, 64.0));

        assert!(collide(&mover, mover.position(), &wall, Vec2::new(200.0, 0.0)).is_none());
    }

    #[test]
    fn stationary_disjoint_bodies_do_not_collide() {
        let a = make_body(0, "a", Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = make_body(1, "b", Rect::new(50.0, 0.0, 10.0, 10.0));

        assert!(collide(&a, a.position(), &b, a.position()).is_none());
    }

    #[test]
    fn resting_overlap_resolves_along_smallest_penetration() {
        // Mover overlaps the other body by 4 on x and 10 on y.
        let mover = make_body(0, "crate", Rect::new(0.0, 0.0, 10.0, 10.0));
        let other = make_body(1, "crate", Rect::new(6.0, 0.0, 10.0, 10.0));

        let col = collide(&mover, mover.position(), &other, mover.position())
            .expect("overlapping bodies collide in place");

        assert!(col.intersection < 0.0, "expected the negative-product marker");
        assert_eq!(col.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(col.motion, Vec2::ZERO);
    }

    #[test]
    fn sweep_against_self_is_ignored() {
        let mover = make_body(0, "player", Rect::new(0.0, 0.0, 32.0, 32.0));
        assert!(collide(&mover, mover.position(), &mover, Vec2::new(10.0, 0.0)).is_none());
    }
}

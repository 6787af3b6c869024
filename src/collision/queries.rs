use glam::Vec2;

use crate::collision::broadphase::SpatialGrid;
use crate::core::body::Body;
use crate::core::types::Rect;
use crate::utils::allocator::{Arena, BodyId};

/// Bodies whose rectangles may overlap `rect`, optionally restricted to a
/// set of tags. Results are ordered by id.
pub(crate) fn query_rect(
    grid: &SpatialGrid,
    bodies: &Arena<Body>,
    rect: Rect,
    tags: &[&str],
) -> Vec<BodyId> {
    let cells = grid.cells_in_rect(rect);
    grid.bodies_in_cells(&cells)
        .into_iter()
        .filter(|id| bodies.get(*id).is_some_and(|body| body.has_tag(tags)))
        .collect()
}

/// Bodies strictly containing the point. Results are ordered by id.
pub(crate) fn query_point(
    grid: &SpatialGrid,
    bodies: &Arena<Body>,
    p: Vec2,
    tags: &[&str],
) -> Vec<BodyId> {
    let Some(cell) = grid.cell_at(p) else {
        return Vec::new();
    };

    let mut ids: Vec<BodyId> = cell
        .bodies
        .iter()
        .copied()
        .filter(|id| {
            bodies
                .get(*id)
                .is_some_and(|body| body.has_tag(tags) && body.rect().contains_point(p))
        })
        .collect();
    ids.sort_unstable();
    ids
}

/// Bodies crossed by the segment `p1 → p2`, ordered by the fraction of the
/// segment at which each body is first touched (ties broken by id).
pub(crate) fn query_segment(
    grid: &SpatialGrid,
    bodies: &Arena<Body>,
    p1: Vec2,
    p2: Vec2,
    tags: &[&str],
) -> Vec<BodyId> {
    let cells = grid.cells_along_segment(p1, p2);
    let delta = p2 - p1;

    let mut hits: Vec<(f32, BodyId)> = Vec::new();
    for id in grid.bodies_in_cells(&cells) {
        let Some(body) = bodies.get(id) else {
            continue;
        };
        if !body.has_tag(tags) {
            continue;
        }
        if let Some((fraction, _)) = body.rect().segment_intersection(p1, delta) {
            hits.push((fraction, id));
        }
    }

    hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    hits.into_iter().map(|(_, id)| id).collect()
}

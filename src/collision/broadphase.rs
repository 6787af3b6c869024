use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::core::body::Body;
use crate::core::types::{CellCoord, Rect};
use crate::utils::allocator::BodyId;

/// One broad-phase cell: the set of bodies whose rectangles overlap it.
#[derive(Debug, Default)]
pub(crate) struct Cell {
    pub(crate) bodies: HashSet<BodyId>,
}

/// Uniform sparse grid used as the broad-phase index.
///
/// Cells are addressed by integer coordinates (`floor(coord / cell_size)`),
/// created lazily on first insert and never reclaimed; an empty cell is
/// acceptable ephemeral overhead. The cell size is fixed for the grid's
/// lifetime.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellCoord, Cell>,
}

impl SpatialGrid {
    pub(crate) fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells allocated so far. Mostly interesting for diagnostics.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cell_coords_at(&self, p: Vec2) -> CellCoord {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Inclusive cell span covered by a rectangle: `floor` for the low edge,
    /// `ceil` for the high edge.
    fn cell_span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let (left, top) = self.cell_coords_at(rect.min());
        let max = rect.max();
        let right = (max.x / self.cell_size).ceil() as i32 - 1;
        let bottom = (max.y / self.cell_size).ceil() as i32 - 1;
        (left, top, right, bottom)
    }

    /// Re-synchronizes a body's cell membership with its current rectangle:
    /// leaves every back-referenced cell, then enters every cell overlapping
    /// the rectangle and rebuilds the back-reference list.
    pub(crate) fn update(&mut self, body: &mut Body) {
        let id = body.id;
        for coord in body.cells.drain(..) {
            if let Some(cell) = self.cells.get_mut(&coord) {
                cell.bodies.remove(&id);
            }
        }

        let (left, top, right, bottom) = self.cell_span(body.rect());
        for cy in top..=bottom {
            for cx in left..=right {
                self.cells.entry((cx, cy)).or_default().bodies.insert(id);
                body.cells.push((cx, cy));
            }
        }
    }

    /// Removes a body from every cell it occupies.
    pub(crate) fn remove(&mut self, body: &mut Body) {
        let id = body.id;
        for coord in body.cells.drain(..) {
            if let Some(cell) = self.cells.get_mut(&coord) {
                cell.bodies.remove(&id);
            }
        }
    }

    /// Existing cells whose coordinates fall inside the rectangle's span.
    /// Never allocates cells on a read path.
    pub(crate) fn cells_in_rect(&self, rect: Rect) -> Vec<CellCoord> {
        let (left, top, right, bottom) = self.cell_span(rect);
        let mut coords = Vec::new();
        for cy in top..=bottom {
            for cx in left..=right {
                if self.cells.contains_key(&(cx, cy)) {
                    coords.push((cx, cy));
                }
            }
        }
        coords
    }

    /// Bodies across the given cells, deduplicated. The result is sorted by
    /// id before dedup so set iteration order never leaks into callers.
    pub(crate) fn bodies_in_cells(&self, coords: &[CellCoord]) -> Vec<BodyId> {
        let mut ids: Vec<BodyId> = coords
            .iter()
            .filter_map(|coord| self.cells.get(coord))
            .flat_map(|cell| cell.bodies.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// The cell under a world-space point, if one has been created.
    pub(crate) fn cell_at(&self, p: Vec2) -> Option<&Cell> {
        self.cells.get(&self.cell_coords_at(p))
    }

    /// Cell coordinates crossed by the segment `p1 → p2`, in traversal
    /// order, deduplicated. Cells are not created as a side effect.
    pub(crate) fn cells_along_segment(&self, p1: Vec2, p2: Vec2) -> Vec<CellCoord> {
        let mut coords = Vec::new();
        let mut seen = HashSet::new();
        self.trace_ray(p1, p2, |coord| {
            if seen.insert(coord) {
                coords.push(coord);
            }
        });
        coords
    }

    /// Step parameters for one axis of the traversal: cell step direction,
    /// t-increment per cell, and t of the first boundary crossing. A
    /// degenerate axis (no movement) never steps and never divides by zero.
    fn ray_step(&self, t1: f32, t2: f32) -> (i32, f32, f32) {
        let v = t2 - t1;
        if v > 0.0 {
            let delta = self.cell_size / v;
            (1, delta, delta * (1.0 - frac(t1 / self.cell_size)))
        } else if v < 0.0 {
            let delta = self.cell_size / v;
            (-1, -delta, -delta * frac(t1 / self.cell_size))
        } else {
            (0, f32::INFINITY, f32::INFINITY)
        }
    }

    // Incremental voxel traversal after Amanatides & Woo, "A Fast Voxel
    // Traversal Algorithm for Ray Tracing". Two deviations from the paper:
    // when the step parameters tie exactly (the segment passes through a
    // grid corner) both adjacent cells are visited, and iteration stops next
    // to the destination cell, which is then visited explicitly. Float drift
    // in the accumulated t values must not skip or overshoot it.
    fn trace_ray<F: FnMut(CellCoord)>(&self, p1: Vec2, p2: Vec2, mut visit: F) {
        let (start_x, start_y) = self.cell_coords_at(p1);
        let (end_x, end_y) = self.cell_coords_at(p2);
        let (step_x, dx, mut tx) = self.ray_step(p1.x, p2.x);
        let (step_y, dy, mut ty) = self.ray_step(p1.y, p2.y);
        let (mut cx, mut cy) = (start_x, start_y);

        visit((cx, cy));
        while (cx - end_x).abs() + (cy - end_y).abs() > 1 {
            if tx < ty {
                tx += dx;
                cx += step_x;
            } else {
                if tx == ty {
                    visit((cx + step_x, cy));
                }
                ty += dy;
                cy += step_y;
            }
            visit((cx, cy));
        }

        if (cx, cy) != (end_x, end_y) {
            visit((end_x, end_y));
        }
    }
}

fn frac(v: f32) -> f32 {
    v - v.floor()
}

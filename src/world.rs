use std::collections::{HashMap, HashSet, VecDeque};

use glam::Vec2;
use log::{debug, trace};

use crate::collision::broadphase::SpatialGrid;
use crate::collision::narrowphase;
use crate::collision::queries;
use crate::collision::response::Response;
use crate::config::DEFAULT_CELL_SIZE;
use crate::core::body::Body;
use crate::core::types::{sort_collisions, Collision, Rect};
use crate::error::WorldError;
use crate::utils::allocator::{Arena, BodyId};
use crate::utils::logging::ScopedTimer;

/// The virtual world in which collisions happen.
///
/// Owns the body arena, the broad-phase grid, and the registry of named
/// responses. Bodies are addressed by [`BodyId`]; geometry changes go
/// through the world so grid membership stays in sync with body rectangles.
pub struct World {
    bodies: Arena<Body>,
    grid: SpatialGrid,
    responses: HashMap<String, Response>,
}

impl World {
    /// Builds a world with the provided grid cell size. In tile based games
    /// the cell size is usually a multiple of the tile side; in sparser
    /// worlds it can be larger.
    pub fn new(cell_size: f32) -> Result<Self, WorldError> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(WorldError::InvalidCellSize(cell_size));
        }

        let mut responses = HashMap::new();
        responses.insert("touch".to_owned(), Response::Touch);
        responses.insert("cross".to_owned(), Response::Cross);
        responses.insert("slide".to_owned(), Response::Slide);
        responses.insert("bounce".to_owned(), Response::Bounce);

        Ok(Self {
            bodies: Arena::new(),
            grid: SpatialGrid::new(cell_size),
            responses,
        })
    }

    /// Builds a world with [`DEFAULT_CELL_SIZE`].
    pub fn with_default_cell_size() -> Self {
        match Self::new(DEFAULT_CELL_SIZE) {
            Ok(world) => world,
            Err(_) => unreachable!("default cell size is valid"),
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    /// Creates a new tracked body occupying `rect` and registers it into the
    /// grid. The tag decides which response other bodies use against it.
    pub fn add_body(&mut self, tag: impl Into<String>, rect: Rect) -> Result<BodyId, WorldError> {
        if !(rect.size.x > 0.0) || !(rect.size.y > 0.0) {
            return Err(WorldError::InvalidBodySize {
                w: rect.size.x,
                h: rect.size.y,
            });
        }

        let id = self.bodies.insert(Body::new(tag.into(), rect));
        if let Some(body) = self.bodies.get_mut(id) {
            body.id = id;
            self.grid.update(body);
            debug!("added body {:?} tag={:?} at {:?}", id, body.tag(), rect.pos);
        }
        Ok(id)
    }

    /// Removes a body from the world; it no longer collides with anything.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let mut body = self.bodies.remove(id)?;
        self.grid.remove(&mut body);
        debug!("removed body {:?}", id);
        Some(body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Registers (or replaces) a response under `name`. Bodies refer to
    /// responses by name through their per-tag response maps.
    pub fn add_response(&mut self, name: impl Into<String>, response: Response) {
        self.responses.insert(name.into(), response);
    }

    /// Moves a body toward `goal` resolving collisions along the way, and
    /// commits the final position. Returns where the body actually ended up
    /// together with the ordered collisions encountered in between. Static
    /// bodies are never swept and stay where they are.
    pub fn move_body(&mut self, id: BodyId, goal: Vec2) -> Option<(Vec2, Vec<Collision>)> {
        let _timer = ScopedTimer::new("world::move_body");
        let body = self.bodies.get(id)?;
        if body.is_static() {
            return Some((body.position(), Vec::new()));
        }

        let (actual, collisions) = self.check(id, goal)?;
        self.update_position(id, actual);
        Some((actual, collisions))
    }

    /// Repositions a body without collision detection. This is the only
    /// path that mutates grid membership. Ignored for static bodies and for
    /// no-op position changes.
    pub fn update_position(&mut self, id: BodyId, position: Vec2) {
        let Some(body) = self.bodies.get_mut(id) else {
            return;
        };
        if body.is_static() || body.position() == position {
            return;
        }
        body.set_position(position);
        self.grid.update(body);
    }

    /// Projects the goal location of a body without moving it: the sorted
    /// collisions the move would produce. Useful for look-ahead checks.
    pub fn project(&self, id: BodyId, goal: Vec2) -> Vec<Collision> {
        let _timer = ScopedTimer::new("world::project");
        let Some(body) = self.bodies.get(id) else {
            debug!("project on unknown body {:?}", id);
            return Vec::new();
        };
        self.project_from(body, body.position(), goal)
    }

    /// Resolution loop: repeatedly sweep, resolve the first actionable
    /// collision through its response, and re-sweep from wherever the
    /// response decided, until the frontier drains. Each body is resolved at
    /// most once per call, which bounds the loop. Pure with respect to world
    /// state; the caller commits the returned position.
    fn check(&self, id: BodyId, goal: Vec2) -> Option<(Vec2, Vec<Collision>)> {
        let body = self.bodies.get(id)?;
        let mut position = body.position();
        let mut goal = goal;
        let mut visited: HashSet<BodyId> = HashSet::from([id]);
        let mut resolved: Vec<Collision> = Vec::new();

        let mut frontier: VecDeque<Collision> =
            self.project_from(body, position, goal).into();
        while let Some(collision) = frontier.pop_front() {
            if visited.contains(&collision.body) {
                continue;
            }
            let Some(response) = self.responses.get(&collision.response) else {
                trace!(
                    "skipping collision with {:?}: no response named {:?}",
                    collision.body,
                    collision.response
                );
                continue;
            };

            visited.insert(collision.body);
            let outcome = response.resolve(self, &collision, id, position, goal);
            trace!(
                "resolved {:?} via {:?}: goal {:?} -> {:?}",
                collision.body,
                collision.response,
                goal,
                outcome.goal
            );

            let mut recorded = collision;
            if let Some(data) = outcome.data {
                recorded.data = data;
            }
            resolved.push(recorded);

            goal = outcome.goal;
            frontier.clear();
            if let Some(from) = outcome.sweep_from {
                position = from;
                frontier.extend(self.project_from(body, position, goal));
            }
        }

        Some((goal, resolved))
    }

    /// One sweep of `body` (as if standing at `position`) toward `goal`:
    /// broad-phase candidates from the swept bounds, narrow-phase test per
    /// candidate, results sorted by (intersection, distance, id).
    fn project_from(&self, body: &Body, position: Vec2, goal: Vec2) -> Vec<Collision> {
        let swept = narrowphase::swept_bounds(body.size(), position, goal);
        let cells = self.grid.cells_in_rect(swept);

        let mut collisions = Vec::new();
        for other_id in self.grid.bodies_in_cells(&cells) {
            if other_id == body.id() {
                continue;
            }
            let Some(other) = self.bodies.get(other_id) else {
                continue;
            };
            if let Some(collision) = narrowphase::collide(body, position, other, goal) {
                collisions.push(collision);
            }
        }

        sort_collisions(&mut collisions);
        collisions
    }

    /// Bodies in the given rectangle, optionally restricted to tags.
    pub fn query_rect(&self, rect: Rect, tags: &[&str]) -> Vec<BodyId> {
        queries::query_rect(&self.grid, &self.bodies, rect, tags)
    }

    /// Bodies underneath the point, optionally restricted to tags.
    pub fn query_point(&self, p: Vec2, tags: &[&str]) -> Vec<BodyId> {
        queries::query_point(&self.grid, &self.bodies, p, tags)
    }

    /// Bodies underneath the segment, ordered by where the segment first
    /// touches them, optionally restricted to tags.
    pub fn query_segment(&self, p1: Vec2, p2: Vec2, tags: &[&str]) -> Vec<BodyId> {
        queries::query_segment(&self.grid, &self.bodies, p1, p2, tags)
    }
}

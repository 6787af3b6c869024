//! Sweepgrid – a deterministic, tunneling-proof collision engine for Rust.
//!
//! The crate tracks axis-aligned rectangles ("bodies") in a 2D world and
//! answers one question: given a body's current rectangle and a desired
//! destination, where does it actually end up, and which other bodies did it
//! encounter along the way? Movement is resolved by fraction of the attempted
//! displacement rather than by frame stepping, so every body behaves like a
//! bullet: no displacement is large enough to tunnel through an obstacle.
//!
//! Collisions are resolved through named responses (`touch`, `cross`,
//! `slide`, `bounce`, or custom ones registered at runtime) chosen per pair
//! of body tags.
//!
//! ```
//! use sweepgrid::{Rect, Vec2, World};
//!
//! let mut world = World::new(64.0).unwrap();
//! let wall = world.add_body("wall", Rect::new(64.0, 0.0, 64.0, 64.0)).unwrap();
//! world.body_mut(wall).unwrap().set_static(true);
//!
//! let player = world.add_body("player", Rect::new(0.0, 0.0, 32.0, 32.0)).unwrap();
//! let (position, collisions) = world.move_body(player, Vec2::new(200.0, 0.0)).unwrap();
//!
//! assert!(position.x < 32.0 + 1e-3); // blocked with its edge at the wall
//! assert_eq!(collisions.len(), 1);
//! ```

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use crate::collision::broadphase::SpatialGrid;
pub use crate::collision::response::{Response, ResponseFn, ResponseOutcome};
pub use crate::core::body::Body;
pub use crate::core::types::{CellCoord, Collision, Rect};
pub use crate::error::WorldError;
pub use crate::utils::allocator::{Arena, BodyId};
pub use crate::world::World;

use parking_lot::{Mutex, MutexGuard};

/// Convenience facade that owns a [`World`] behind a single lock.
///
/// The engine's algorithms are synchronous and single-threaded by design;
/// one lock around world mutation is all the synchronization concurrent
/// callers need. Wrap this in an `Arc` to share a world across threads.
pub struct SharedWorld {
    world: Mutex<World>,
}

impl SharedWorld {
    /// Creates a shared world with the provided grid cell size.
    pub fn new(cell_size: f32) -> Result<Self, WorldError> {
        Ok(Self {
            world: Mutex::new(World::new(cell_size)?),
        })
    }

    /// Locks the world for a batch of operations.
    pub fn lock(&self) -> MutexGuard<'_, World> {
        self.world.lock()
    }

    /// Adds a body under the lock. See [`World::add_body`].
    pub fn add_body(&self, tag: &str, rect: Rect) -> Result<BodyId, WorldError> {
        self.world.lock().add_body(tag, rect)
    }

    /// Moves a body under the lock. See [`World::move_body`].
    pub fn move_body(&self, id: BodyId, goal: Vec2) -> Option<(Vec2, Vec<Collision>)> {
        self.world.lock().move_body(id, goal)
    }

    /// Projects a move under the lock. See [`World::project`].
    pub fn project(&self, id: BodyId, goal: Vec2) -> Vec<Collision> {
        self.world.lock().project(id, goal)
    }
}

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use crate::core::types::Collision;
use crate::utils::allocator::BodyId;
use crate::world::World;

/// What a response decided for the current collision.
#[derive(Debug, Clone, Copy)]
pub struct ResponseOutcome {
    /// The new working goal for the rest of the move.
    pub goal: Vec2,
    /// Where the next sweep starts. `None` stops the resolution loop with an
    /// empty frontier.
    pub sweep_from: Option<Vec2>,
    /// Optional point stamped into the recorded collision's `data` field.
    pub data: Option<Vec2>,
}

/// Signature shared by custom responses: `(world, collision, moving body,
/// working position, working goal)`. Must return a finite outcome; the
/// resolution loop guarantees termination as long as it does.
pub type ResponseFn =
    Arc<dyn Fn(&World, &Collision, BodyId, Vec2, Vec2) -> ResponseOutcome + Send + Sync>;

/// How a collision is resolved. The four built-ins cover the usual cases;
/// `Custom` extends the set at runtime without giving up the closed dispatch
/// below.
#[derive(Clone)]
pub enum Response {
    /// Stop exactly at the touch point; nothing further along the path.
    Touch,
    /// Record the collision but keep the requested goal, re-sweeping the
    /// unmodified path for anything else along it.
    Cross,
    /// Clamp the goal to the touch point on the normal axis and keep the
    /// tangential component, so the body slides along the obstruction.
    Slide,
    /// Reflect the remaining displacement across the collision normal.
    Bounce,
    /// User-registered behavior with the same contract.
    Custom(ResponseFn),
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Touch => f.write_str("Touch"),
            Response::Cross => f.write_str("Cross"),
            Response::Slide => f.write_str("Slide"),
            Response::Bounce => f.write_str("Bounce"),
            Response::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Response {
    pub(crate) fn resolve(
        &self,
        world: &World,
        collision: &Collision,
        body: BodyId,
        position: Vec2,
        goal: Vec2,
    ) -> ResponseOutcome {
        match self {
            Response::Touch => ResponseOutcome {
                goal: collision.touch,
                sweep_from: None,
                data: None,
            },
            Response::Cross => ResponseOutcome {
                goal,
                sweep_from: Some(position),
                data: None,
            },
            Response::Slide => {
                let mut next = goal;
                if collision.motion == Vec2::ZERO {
                    next = collision.touch;
                } else {
                    if collision.normal.x != 0.0 {
                        next.x = collision.touch.x;
                    }
                    if collision.normal.y != 0.0 {
                        next.y = collision.touch.y;
                    }
                }
                ResponseOutcome {
                    goal: next,
                    sweep_from: Some(collision.touch),
                    data: Some(next),
                }
            }
            Response::Bounce => {
                let mut next = collision.touch;
                if collision.motion != Vec2::ZERO {
                    let remaining = goal - collision.touch;
                    let reflected = if collision.normal.x != 0.0 {
                        Vec2::new(-remaining.x, remaining.y)
                    } else {
                        Vec2::new(remaining.x, -remaining.y)
                    };
                    next = collision.touch + reflected;
                }
                ResponseOutcome {
                    goal: next,
                    sweep_from: Some(collision.touch),
                    data: Some(next),
                }
            }
            Response::Custom(resolve) => resolve(world, collision, body, position, goal),
        }
    }
}

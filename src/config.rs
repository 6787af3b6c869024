//! Global configuration constants for the Sweepgrid engine.

/// Default side length of the broad-phase grid cells. In tile based games this
/// is usually a multiple of the tile size; in sparser worlds it can be larger.
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Outward nudge applied to resolved touch points along the collision normal.
/// Keeps a resolved body from being re-detected as overlapping on the next
/// sweep due to floating-point equality at the boundary.
pub const TOUCH_NUDGE: f32 = 0.01;

/// Name of the response every body starts with under the fallback key.
pub const DEFAULT_RESPONSE: &str = "slide";

/// Reserved key in a body's response map consulted when no entry matches the
/// other body's tag.
pub const DEFAULT_RESPONSE_KEY: &str = "default";

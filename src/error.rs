//! Error types for world construction.

/// Errors reported when a world or body is built from malformed input.
///
/// Runtime geometry paths are infallible; only construction-time
/// configuration is validated.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WorldError {
    /// The grid cell size must be positive and finite.
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    /// A body rectangle must have positive width and height.
    #[error("body size must be positive, got {w}x{h}")]
    InvalidBodySize {
        /// Requested width.
        w: f32,
        /// Requested height.
        h: f32,
    },
}

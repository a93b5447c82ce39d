/// Alias for `Result<T, SpatialError>`.
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Errors that can occur when configuring or mutating a spatial grid.
///
/// Collision rejection and unknown-id removal are expected outcomes signaled
/// through return values, not through this enum.
#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    /// The cell size must be a positive, finite number.
    #[error("invalid cell size {0}: must be positive and finite")]
    InvalidCellSize(f64),

    /// The world bounds have min > max on at least one axis.
    #[error("invalid world bounds: min must be <= max on every axis")]
    InvalidBounds,

    /// An object with the same id is already placed in the grid.
    #[error("object already placed: \"{0}\"")]
    DuplicateId(String),
}

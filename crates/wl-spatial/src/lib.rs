//! Spatial hash grid for collision-aware procedural placement.
//!
//! The grid answers "where can this object go without overlapping": objects
//! are bucketed into uniform cells for a cheap broad phase, then tested with
//! exact box geometry. Placement search is rejection sampling over the world
//! volume against a [`PlacementRule`], with an injected RNG so callers can
//! make it deterministic.

/// Error types used throughout the crate.
pub mod error;
/// Primitive 3D geometry: vectors and axis-aligned boxes.
pub mod geometry;
/// The spatial hash grid and its collision and radius queries.
pub mod grid;
/// Placement rules and the randomized placement search.
pub mod placement;

/// Re-export error types.
pub use error::{SpatialError, SpatialResult};
/// Re-export geometry primitives.
pub use geometry::{BoundingBox, Vector3};
/// Re-export the grid and its object types.
pub use grid::{GridStats, PlacedObject, SpatialGrid};
/// Re-export placement configuration.
pub use placement::{DEFAULT_MAX_ATTEMPTS, PlacementRule};

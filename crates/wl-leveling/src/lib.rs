//! XP curve calculator and content-budget planner.
//!
//! The leveling system answers "is there enough content to let a player
//! progress to the cap": it precomputes the XP required to clear each
//! level from a configured curve, allocates the total across content
//! categories per a budget, and validates authored content sets against
//! that total. Pure deterministic arithmetic, no I/O, no partial failure.

/// Content budget configuration and requirement breakdowns.
pub mod budget;
/// XP curve shapes and per-level cost computation.
pub mod curve;
/// Error types used throughout the crate.
pub mod error;
/// The leveling planner built on a precomputed XP table.
pub mod system;

/// Re-export budget configuration types.
pub use budget::{CategoryRequirement, ContentBudget, ContentRequirements};
/// Re-export curve configuration types.
pub use curve::{CurveKind, XpCurve};
/// Re-export error types.
pub use error::{LevelError, LevelResult};
/// Re-export the planner and its report types.
pub use system::{ContentValidation, LevelingStats, LevelingSystem};

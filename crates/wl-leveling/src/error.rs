/// Alias for `Result<T, LevelError>`.
pub type LevelResult<T> = Result<T, LevelError>;

/// Errors from leveling configuration and table lookups.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The level cap must be at least 1.
    #[error("invalid max level {0}: must be at least 1")]
    InvalidMaxLevel(u32),

    /// A per-category average XP of zero would divide by zero when
    /// converting XP budgets into content counts.
    #[error("content budget has a zero average XP for category \"{0}\"")]
    ZeroCategoryXp(&'static str),

    /// A level outside the precomputed table's domain was requested.
    #[error("level {level} is outside the table domain [1, {max_level}]")]
    LevelOutOfRange {
        /// The requested level.
        level: u32,
        /// The table's level cap.
        max_level: u32,
    },

    /// A level range is inverted or exceeds the table's domain.
    #[error("invalid level range [{min_level}, {max_level}]")]
    InvalidRange {
        /// The requested range start.
        min_level: u32,
        /// The requested range end.
        max_level: u32,
    },
}

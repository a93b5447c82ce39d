use serde::Serialize;

use crate::budget::{CategoryRequirement, ContentBudget, ContentRequirements};
use crate::curve::{CurveKind, XpCurve};
use crate::error::{LevelError, LevelResult};

/// Outcome of validating an authored content set against the XP budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentValidation {
    /// Whether the supplied content covers the total XP to cap.
    pub valid: bool,
    /// XP the supplied content grants in aggregate.
    pub available_xp: u64,
    /// XP required to reach the level cap.
    pub needed_xp: u64,
    /// `available_xp - needed_xp`; negative when content falls short.
    pub deficit: i64,
    /// Human-readable suggestions for closing a shortfall. Empty when valid.
    pub suggestions: Vec<String>,
}

/// Read-only summary of the leveling configuration and its budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelingStats {
    /// The level cap.
    pub max_level: u32,
    /// Total XP required to clear every level up to the cap.
    pub total_xp_needed: u64,
    /// The configured curve shape.
    pub curve: CurveKind,
    /// Mean XP per level across the whole table.
    pub avg_xp_per_level: u64,
    /// Per-category content requirements at the current budget.
    pub content_requirements: ContentRequirements,
}

/// XP-budget planner over a precomputed per-level table.
///
/// The table and total are derived once at construction from
/// `(max_level, curve)`; there is no in-place mutation API. Reconstruct
/// to change parameters.
#[derive(Debug, Clone)]
pub struct LevelingSystem {
    max_level: u32,
    curve: XpCurve,
    budget: ContentBudget,
    xp_per_level: Vec<u64>,
    total_xp_needed: u64,
}

impl LevelingSystem {
    /// Build the planner, precomputing the XP table.
    ///
    /// Fails fast on a zero level cap or a zero per-category average XP
    /// (which would divide by zero when sizing content counts).
    pub fn new(max_level: u32, curve: XpCurve, budget: ContentBudget) -> LevelResult<Self> {
        if max_level == 0 {
            return Err(LevelError::InvalidMaxLevel(max_level));
        }
        for (avg, category) in [
            (budget.avg_main_quest_xp, "main_quests"),
            (budget.avg_side_quest_xp, "side_quests"),
            (budget.avg_dungeon_xp, "dungeons"),
            (budget.avg_event_xp, "events"),
        ] {
            if avg == 0 {
                return Err(LevelError::ZeroCategoryXp(category));
            }
        }

        let xp_per_level: Vec<u64> = (1..=max_level).map(|l| curve.xp_for_level(l)).collect();
        let total_xp_needed = xp_per_level.iter().sum();

        Ok(Self {
            max_level,
            curve,
            budget,
            xp_per_level,
            total_xp_needed,
        })
    }

    /// The level cap.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// The configured curve.
    pub fn curve(&self) -> &XpCurve {
        &self.curve
    }

    /// The configured content budget.
    pub fn budget(&self) -> &ContentBudget {
        &self.budget
    }

    /// Total XP required to clear every level up to the cap.
    pub fn total_xp_needed(&self) -> u64 {
        self.total_xp_needed
    }

    /// XP required to clear one level, from the precomputed table.
    ///
    /// Levels outside `[1, max_level]` are caller misuse of the table's
    /// domain and raise [`LevelError::LevelOutOfRange`].
    pub fn xp_for_level(&self, level: u32) -> LevelResult<u64> {
        if level == 0 || level > self.max_level {
            return Err(LevelError::LevelOutOfRange {
                level,
                max_level: self.max_level,
            });
        }
        Ok(self.xp_per_level[(level - 1) as usize])
    }

    /// Sum of the per-level table over `[min_level, max_level]` inclusive.
    /// An empty range (min > max) sums to zero.
    pub fn get_level_range_xp(&self, min_level: u32, max_level: u32) -> LevelResult<u64> {
        (min_level..=max_level).try_fold(0u64, |acc, level| Ok(acc + self.xp_for_level(level)?))
    }

    /// How much content each category must supply to reach the cap,
    /// given the configured budget.
    pub fn calculate_content_requirements(&self) -> ContentRequirements {
        let category = |percent: f64, avg_xp: u64| {
            let total_xp = (self.total_xp_needed as f64 * percent) as u64;
            CategoryRequirement {
                total_xp,
                count: total_xp / avg_xp,
                avg_xp,
            }
        };
        ContentRequirements {
            main_quests: category(self.budget.main_quests_percent, self.budget.avg_main_quest_xp),
            side_quests: category(self.budget.side_quests_percent, self.budget.avg_side_quest_xp),
            dungeons: category(self.budget.dungeons_percent, self.budget.avg_dungeon_xp),
            events: category(self.budget.events_percent, self.budget.avg_event_xp),
        }
    }

    /// Check whether the given content counts supply enough XP to reach
    /// the cap, suggesting additions when they do not.
    ///
    /// The main-quest and side-quest suggestions are independent options,
    /// not additive.
    pub fn validate_content_xp(
        &self,
        main_quest_count: u64,
        side_quest_count: u64,
        dungeon_count: u64,
        event_count: u64,
    ) -> ContentValidation {
        let available_xp = main_quest_count * self.budget.avg_main_quest_xp
            + side_quest_count * self.budget.avg_side_quest_xp
            + dungeon_count * self.budget.avg_dungeon_xp
            + event_count * self.budget.avg_event_xp;

        let deficit = available_xp as i64 - self.total_xp_needed as i64;
        let valid = deficit >= 0;

        let mut suggestions = Vec::new();
        if !valid {
            let needed = deficit.unsigned_abs();
            suggestions.push(format!(
                "Need {needed} more XP to reach level {}",
                self.max_level
            ));
            let main_quests_needed = needed / self.budget.avg_main_quest_xp;
            if main_quests_needed > 0 {
                suggestions.push(format!("Add ~{main_quests_needed} main quests"));
            }
            let side_quests_needed = needed / self.budget.avg_side_quest_xp;
            if side_quests_needed > 0 {
                suggestions.push(format!("Or add ~{side_quests_needed} side quests"));
            }
        }

        ContentValidation {
            valid,
            available_xp,
            needed_xp: self.total_xp_needed,
            deficit,
            suggestions,
        }
    }

    /// Ad hoc reward scaling: +10% of `base_xp` per level past the first,
    /// truncated. Independent of the main curve.
    pub fn scale_quest_xp(&self, quest_level: u32, base_xp: u64) -> u64 {
        (base_xp as f64 * (1.0 + (f64::from(quest_level) - 1.0) * 0.1)) as u64
    }

    /// Assign a level to each of `content_count` items, round-robin across
    /// `[min_level, max_level]` (cap-bounded; defaults to the table's cap),
    /// returning the sorted list. Coverage stays roughly even regardless of
    /// how the item count compares to the range size.
    pub fn distribute_content_across_levels(
        &self,
        content_count: usize,
        min_level: u32,
        max_level: Option<u32>,
    ) -> LevelResult<Vec<u32>> {
        let max_level = max_level.unwrap_or(self.max_level);
        if min_level == 0 || min_level > max_level || max_level > self.max_level {
            return Err(LevelError::InvalidRange {
                min_level,
                max_level,
            });
        }

        let span = (max_level - min_level + 1) as usize;
        let mut levels: Vec<u32> = (0..content_count)
            .map(|i| min_level + (i % span) as u32)
            .collect();
        levels.sort_unstable();
        Ok(levels)
    }

    /// Snapshot of the configuration and derived budget numbers.
    pub fn stats(&self) -> LevelingStats {
        LevelingStats {
            max_level: self.max_level,
            total_xp_needed: self.total_xp_needed,
            curve: self.curve.kind,
            avg_xp_per_level: self.total_xp_needed / u64::from(self.max_level),
            content_requirements: self.calculate_content_requirements(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_level_planner() -> LevelingSystem {
        // max_level 10, exponential, base 100, exponent 1.5
        LevelingSystem::new(10, XpCurve::default(), ContentBudget::default()).unwrap()
    }

    #[test]
    fn zero_max_level_rejected() {
        let result = LevelingSystem::new(0, XpCurve::default(), ContentBudget::default());
        assert!(matches!(result, Err(LevelError::InvalidMaxLevel(0))));
    }

    #[test]
    fn zero_category_average_rejected() {
        let budget = ContentBudget::default().with_avg_xp(500, 0, 1000, 300);
        let result = LevelingSystem::new(10, XpCurve::default(), budget);
        assert!(matches!(result, Err(LevelError::ZeroCategoryXp("side_quests"))));
    }

    #[test]
    fn total_matches_literal_sum_of_truncated_levels() {
        let system = ten_level_planner();
        let expected: u64 = (1..=10u32)
            .map(|l| (100.0 * f64::from(l).powf(1.5)) as u64)
            .sum();
        assert_eq!(system.total_xp_needed(), expected);
        assert_eq!(system.get_level_range_xp(1, 10).unwrap(), expected);
    }

    #[test]
    fn level_range_sums_are_partial_and_inclusive() {
        let system = ten_level_planner();
        let head = system.get_level_range_xp(1, 5).unwrap();
        let tail = system.get_level_range_xp(6, 10).unwrap();
        assert_eq!(head + tail, system.total_xp_needed());
        assert_eq!(
            system.get_level_range_xp(3, 3).unwrap(),
            system.xp_for_level(3).unwrap()
        );
        // Empty range sums to zero
        assert_eq!(system.get_level_range_xp(7, 3).unwrap(), 0);
    }

    #[test]
    fn out_of_table_levels_raise() {
        let system = ten_level_planner();
        assert!(matches!(
            system.xp_for_level(0),
            Err(LevelError::LevelOutOfRange { level: 0, .. })
        ));
        assert!(matches!(
            system.xp_for_level(11),
            Err(LevelError::LevelOutOfRange { level: 11, .. })
        ));
        assert!(system.get_level_range_xp(5, 11).is_err());
    }

    #[test]
    fn content_requirements_follow_budget_shares() {
        let system = ten_level_planner();
        let reqs = system.calculate_content_requirements();
        let total = system.total_xp_needed();

        assert_eq!(reqs.main_quests.total_xp, (total as f64 * 0.35) as u64);
        assert_eq!(reqs.main_quests.avg_xp, 500);
        assert_eq!(reqs.main_quests.count, reqs.main_quests.total_xp / 500);
        assert_eq!(reqs.dungeons.avg_xp, 1000);
    }

    #[test]
    fn four_categories_never_exceed_total() {
        // Grinding's share is excluded, so the four sum below the total
        let system = ten_level_planner();
        let reqs = system.calculate_content_requirements();
        let allocated = reqs.main_quests.total_xp
            + reqs.side_quests.total_xp
            + reqs.dungeons.total_xp
            + reqs.events.total_xp;
        assert!(allocated <= system.total_xp_needed());
    }

    #[test]
    fn validation_passes_with_ample_content() {
        let system = ten_level_planner();
        let report = system.validate_content_xp(100, 100, 100, 100);
        assert!(report.valid);
        assert!(report.deficit >= 0);
        assert!(report.suggestions.is_empty());
        assert_eq!(report.needed_xp, system.total_xp_needed());
    }

    #[test]
    fn validation_shortfall_suggests_both_quest_options() {
        let system = ten_level_planner();
        let report = system.validate_content_xp(1, 1, 0, 0);
        assert!(!report.valid);
        assert_eq!(report.available_xp, 700);
        assert_eq!(
            report.deficit,
            700 - system.total_xp_needed() as i64
        );
        assert_eq!(report.suggestions.len(), 3);
        assert!(report.suggestions[0].contains("more XP to reach level 10"));
        assert!(report.suggestions[1].starts_with("Add ~"));
        assert!(report.suggestions[2].starts_with("Or add ~"));
    }

    #[test]
    fn quest_xp_scales_ten_percent_per_level() {
        let system = ten_level_planner();
        assert_eq!(system.scale_quest_xp(1, 100), 100);
        assert_eq!(system.scale_quest_xp(5, 100), 140);
        assert_eq!(system.scale_quest_xp(5, 250), 350);
    }

    #[test]
    fn distribution_round_robins_then_sorts() {
        let system = ten_level_planner();
        let levels = system.distribute_content_across_levels(7, 1, Some(3)).unwrap();
        assert_eq!(levels, vec![1, 1, 1, 2, 2, 3, 3]);

        let full = system.distribute_content_across_levels(10, 1, None).unwrap();
        assert_eq!(full, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn distribution_rejects_bad_ranges() {
        let system = ten_level_planner();
        assert!(system.distribute_content_across_levels(5, 0, None).is_err());
        assert!(system.distribute_content_across_levels(5, 8, Some(4)).is_err());
        assert!(system.distribute_content_across_levels(5, 1, Some(99)).is_err());
    }

    #[test]
    fn stats_summarize_configuration() {
        let system = ten_level_planner();
        let stats = system.stats();
        assert_eq!(stats.max_level, 10);
        assert_eq!(stats.curve, CurveKind::Exponential);
        assert_eq!(stats.total_xp_needed, system.total_xp_needed());
        assert_eq!(stats.avg_xp_per_level, system.total_xp_needed() / 10);
        assert_eq!(stats.content_requirements, system.calculate_content_requirements());
    }
}

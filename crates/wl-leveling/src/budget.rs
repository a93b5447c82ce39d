use serde::{Deserialize, Serialize};

/// Fractional allocation of the total XP-to-cap across content categories,
/// plus the average XP one item of each category grants.
///
/// The five percentages should conceptually sum to 1.0; that is a caller
/// concern and is not enforced here. The per-category averages are part of
/// the budget so they can be tuned per project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentBudget {
    /// Share of total XP granted by main quests.
    pub main_quests_percent: f64,
    /// Share of total XP granted by side quests.
    pub side_quests_percent: f64,
    /// Share of total XP granted by dungeons.
    pub dungeons_percent: f64,
    /// Share of total XP granted by events.
    pub events_percent: f64,
    /// Share of total XP left to open-ended grinding.
    pub grinding_percent: f64,
    /// Average XP granted by one main quest.
    pub avg_main_quest_xp: u64,
    /// Average XP granted by one side quest.
    pub avg_side_quest_xp: u64,
    /// Average XP granted by one dungeon clear.
    pub avg_dungeon_xp: u64,
    /// Average XP granted by one event.
    pub avg_event_xp: u64,
}

impl Default for ContentBudget {
    fn default() -> Self {
        Self {
            main_quests_percent: 0.35,
            side_quests_percent: 0.25,
            dungeons_percent: 0.20,
            events_percent: 0.10,
            grinding_percent: 0.10,
            avg_main_quest_xp: 500,
            avg_side_quest_xp: 200,
            avg_dungeon_xp: 1000,
            avg_event_xp: 300,
        }
    }
}

impl ContentBudget {
    /// Set the five allocation percentages.
    pub fn with_percents(
        mut self,
        main_quests: f64,
        side_quests: f64,
        dungeons: f64,
        events: f64,
        grinding: f64,
    ) -> Self {
        self.main_quests_percent = main_quests;
        self.side_quests_percent = side_quests;
        self.dungeons_percent = dungeons;
        self.events_percent = events;
        self.grinding_percent = grinding;
        self
    }

    /// Set the four per-category average XP values.
    pub fn with_avg_xp(mut self, main_quest: u64, side_quest: u64, dungeon: u64, event: u64) -> Self {
        self.avg_main_quest_xp = main_quest;
        self.avg_side_quest_xp = side_quest;
        self.avg_dungeon_xp = dungeon;
        self.avg_event_xp = event;
        self
    }
}

/// How much of one content category a level range requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryRequirement {
    /// Total XP allocated to this category.
    pub total_xp: u64,
    /// Number of items needed at the category's average XP.
    pub count: u64,
    /// The average XP per item used for the computation.
    pub avg_xp: u64,
}

/// Per-category requirements to carry a player to the level cap.
///
/// Grinding has no authored content and is deliberately absent, so the
/// four categories together account for less than the full XP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentRequirements {
    /// Main quest requirement.
    pub main_quests: CategoryRequirement,
    /// Side quest requirement.
    pub side_quests: CategoryRequirement,
    /// Dungeon requirement.
    pub dungeons: CategoryRequirement,
    /// Event requirement.
    pub events: CategoryRequirement,
}

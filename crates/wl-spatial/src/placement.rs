use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{BoundingBox, Vector3};
use crate::grid::{PlacedObject, SpatialGrid};

/// Default attempt budget for the rejection-sampling placement search.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Constraints for procedural placement.
///
/// `biome`, `near_water`, and `avoid_slopes` are declared for terrain-aware
/// callers but not enforced by the geometry core, which does not model
/// terrain. The distance constraints and height override are enforced by
/// [`SpatialGrid::find_placement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    /// Rule name, recorded in placed-object metadata.
    pub name: String,
    /// Biome tag ("forest", "desert", ...), recorded but not enforced.
    pub biome: Option<String>,
    /// Whether placements should favor water proximity. Not enforced here.
    pub near_water: bool,
    /// Whether placements should avoid steep terrain. Not enforced here.
    pub avoid_slopes: bool,
    /// No existing object may lie within this radius of a new placement.
    pub min_distance: f64,
    /// If set, at least one existing object must lie within this radius.
    /// Used to cluster, e.g. "place near a camp".
    pub max_distance: Option<f64>,
    /// Overrides the grid's vertical range when sampling candidate heights.
    pub height_range: Option<(f64, f64)>,
}

impl Default for PlacementRule {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            biome: None,
            near_water: false,
            avoid_slopes: false,
            min_distance: 5.0,
            max_distance: None,
            height_range: None,
        }
    }
}

impl PlacementRule {
    /// Create a rule with the given name and default constraints.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the biome tag.
    pub fn with_biome(mut self, biome: impl Into<String>) -> Self {
        self.biome = Some(biome.into());
        self
    }

    /// Set the minimum clearance radius around new placements.
    pub fn with_min_distance(mut self, distance: f64) -> Self {
        self.min_distance = distance;
        self
    }

    /// Require at least one existing object within the given radius.
    pub fn with_max_distance(mut self, distance: f64) -> Self {
        self.max_distance = Some(distance);
        self
    }

    /// Override the vertical sampling range.
    pub fn with_height_range(mut self, min_y: f64, max_y: f64) -> Self {
        self.height_range = Some((min_y, max_y));
        self
    }
}

impl SpatialGrid {
    /// Search for a valid anchor point for an object of the given size.
    ///
    /// Rejection sampling: up to `max_attempts` candidates are drawn
    /// uniformly within the grid bounds (height from the rule's range when
    /// set) and checked against collision and the rule's distance
    /// constraints. The first passing candidate is returned immediately.
    ///
    /// `None` means the attempt budget ran out, an expected outcome rather
    /// than a failure. The search is probabilistic and can miss sparse valid
    /// regions; callers wanting determinism must seed the RNG.
    pub fn find_placement(
        &self,
        size: Vector3,
        rule: &PlacementRule,
        max_attempts: u32,
        rng: &mut StdRng,
    ) -> Option<Vector3> {
        for _ in 0..max_attempts {
            let x = rng.random_range(self.bounds().min.x..=self.bounds().max.x);
            let z = rng.random_range(self.bounds().min.z..=self.bounds().max.z);
            let y = match rule.height_range {
                Some((lo, hi)) => rng.random_range(lo..=hi),
                None => rng.random_range(self.bounds().min.y..=self.bounds().max.y),
            };
            let position = Vector3::new(x, y, z);
            let candidate = BoundingBox::footprint(position, size);

            if self.check_collision(&candidate, None) {
                continue;
            }
            if rule.min_distance > 0.0
                && !self.find_nearby(position, rule.min_distance, None).is_empty()
            {
                continue;
            }
            if let Some(reach) = rule.max_distance
                && self.find_nearby(position, reach, None).is_empty()
            {
                continue;
            }

            return Some(position);
        }
        None
    }

    /// Place up to `count` objects of one type, auto-numbering their ids.
    ///
    /// Each object gets its own placement search; failures are logged and
    /// skipped rather than aborting the batch, so the returned list may be
    /// shorter than `count`.
    pub fn procedural_placement(
        &mut self,
        entity_type: &str,
        count: usize,
        size: Vector3,
        rule: &PlacementRule,
        rng: &mut StdRng,
    ) -> Vec<PlacedObject> {
        let mut placed = Vec::new();

        for i in 0..count {
            let id = format!("{entity_type}_{i:04}");

            let Some(position) = self.find_placement(size, rule, DEFAULT_MAX_ATTEMPTS, rng) else {
                tracing::warn!(%id, entity_type, rule = %rule.name, "no valid placement found within attempt budget");
                continue;
            };

            let bounds = BoundingBox::footprint(position, size);
            let mut obj = PlacedObject::new(id.clone(), entity_type, position, bounds);
            obj.metadata
                .insert("rule".to_string(), Value::String(rule.name.clone()));
            if let Some(biome) = &rule.biome {
                obj.metadata
                    .insert("biome".to_string(), Value::String(biome.clone()));
            }

            let snapshot = obj.clone();
            match self.add_object(obj) {
                Ok(true) => placed.push(snapshot),
                Ok(false) => {
                    tracing::warn!(%id, entity_type, "placement collided after search, skipping");
                }
                Err(err) => {
                    tracing::warn!(%id, entity_type, %err, "placement rejected, skipping");
                }
            }
        }

        placed
    }
}

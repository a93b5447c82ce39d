use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SpatialError, SpatialResult};
use crate::geometry::{BoundingBox, Vector3};

/// Discretized cell coordinate in the spatial hash.
type CellKey = (i64, i64, i64);

/// An object occupying space in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Identifier, unique within the owning grid.
    pub id: String,
    /// Entity type tag ("tree", "camp", "npc", ...).
    pub entity_type: String,
    /// The anchor point the object was placed at.
    pub position: Vector3,
    /// The space the object occupies.
    pub bounds: BoundingBox,
    /// Arbitrary key-value annotations attached at placement time.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl PlacedObject {
    /// Create an object with empty metadata.
    pub fn new(
        id: impl Into<String>,
        entity_type: impl Into<String>,
        position: Vector3,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            position,
            bounds,
            metadata: HashMap::new(),
        }
    }
}

/// Read-only diagnostic view of grid occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    /// Number of objects currently placed.
    pub total_objects: usize,
    /// Number of non-empty hash cells.
    pub grid_cells_used: usize,
    /// The world volume the grid covers.
    pub bounds: BoundingBox,
    /// The configured cell edge length.
    pub cell_size: f64,
}

/// Uniform-cell spatial hash over a 3D world volume.
///
/// An object is bucketed into every cell its bounding box overlaps, so
/// multi-cell objects appear in multiple buckets. This is a spatial hash,
/// not a strict partition. The grid is the single source of truth for
/// whether an id is currently placed.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    bounds: BoundingBox,
    cell_size: f64,
    objects: HashMap<String, PlacedObject>,
    cells: HashMap<CellKey, Vec<String>>,
}

impl SpatialGrid {
    /// Create an empty grid over the given world volume.
    ///
    /// Fails fast on a non-positive or non-finite cell size, or on bounds
    /// with min > max on any axis.
    pub fn new(bounds: BoundingBox, cell_size: f64) -> SpatialResult<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        if bounds.min.x > bounds.max.x || bounds.min.y > bounds.max.y || bounds.min.z > bounds.max.z
        {
            return Err(SpatialError::InvalidBounds);
        }
        Ok(Self {
            bounds,
            cell_size,
            objects: HashMap::new(),
            cells: HashMap::new(),
        })
    }

    /// The world volume the grid covers.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// The configured cell edge length.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Look up a placed object by id.
    pub fn get(&self, id: &str) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    /// Iterate over all placed objects in no particular order.
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.values()
    }

    /// Number of objects currently placed.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects are placed.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add an object to the grid.
    ///
    /// Returns `Ok(false)` without mutating any state if the object's bounds
    /// intersect an already-placed object (touching counts). Returns
    /// [`SpatialError::DuplicateId`] if the id is already placed, a caller
    /// bug distinct from ordinary collision rejection.
    pub fn add_object(&mut self, obj: PlacedObject) -> SpatialResult<bool> {
        if self.objects.contains_key(&obj.id) {
            return Err(SpatialError::DuplicateId(obj.id));
        }
        if self.check_collision(&obj.bounds, Some(&obj.id)) {
            return Ok(false);
        }

        for cell in self.overlapped_cells(&obj.bounds) {
            self.cells.entry(cell).or_default().push(obj.id.clone());
        }
        self.objects.insert(obj.id.clone(), obj);
        Ok(true)
    }

    /// Remove an object by id, returning false if the id is not placed.
    ///
    /// Cell buckets left empty are deleted, so grid state after a remove
    /// matches the state before the matching add exactly.
    pub fn remove_object(&mut self, id: &str) -> bool {
        let Some(obj) = self.objects.remove(id) else {
            return false;
        };
        for cell in self.overlapped_cells(&obj.bounds) {
            if let Some(bucket) = self.cells.get_mut(&cell) {
                bucket.retain(|oid| oid != id);
                if bucket.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
        true
    }

    /// Test whether `bounds` intersects any placed object.
    ///
    /// Broad phase gathers candidate ids from overlapping cells; narrow
    /// phase tests exact box intersection. `exclude` skips one id, so an
    /// object can be tested against everything but itself.
    pub fn check_collision(&self, bounds: &BoundingBox, exclude: Option<&str>) -> bool {
        self.candidates_in(bounds)
            .into_iter()
            .filter(|id| Some(id.as_str()) != exclude)
            .filter_map(|id| self.objects.get(id))
            .any(|obj| bounds.intersects(&obj.bounds))
    }

    /// Find all objects within `radius` of `position`, optionally filtered
    /// by entity type.
    ///
    /// The broad phase searches a cube of side `2 * radius`, which
    /// over-approximates the sphere; the narrow phase filters by true
    /// Euclidean distance to each object's anchor.
    pub fn find_nearby(
        &self,
        position: Vector3,
        radius: f64,
        entity_type: Option<&str>,
    ) -> Vec<&PlacedObject> {
        let reach = Vector3::new(radius, radius, radius);
        let search = BoundingBox::new(position - reach, position + reach);

        self.candidates_in(&search)
            .into_iter()
            .filter_map(|id| self.objects.get(id))
            .filter(|obj| entity_type.is_none_or(|t| obj.entity_type == t))
            .filter(|obj| position.distance_to(obj.position) <= radius)
            .collect()
    }

    /// Snapshot of grid occupancy counts and configuration.
    pub fn stats(&self) -> GridStats {
        GridStats {
            total_objects: self.objects.len(),
            grid_cells_used: self.cells.len(),
            bounds: self.bounds,
            cell_size: self.cell_size,
        }
    }

    /// Deduplicated ids bucketed in any cell overlapping `bounds`.
    fn candidates_in(&self, bounds: &BoundingBox) -> HashSet<&String> {
        let mut candidates = HashSet::new();
        for cell in self.overlapped_cells(bounds) {
            if let Some(bucket) = self.cells.get(&cell) {
                candidates.extend(bucket.iter());
            }
        }
        candidates
    }

    /// All cell keys a box overlaps, inclusive on every axis.
    fn overlapped_cells(&self, bounds: &BoundingBox) -> Vec<CellKey> {
        let lo = self.cell_of(bounds.min);
        let hi = self.cell_of(bounds.max);
        let mut cells = Vec::new();
        for x in lo.0..=hi.0 {
            for y in lo.1..=hi.1 {
                for z in lo.2..=hi.2 {
                    cells.push((x, y, z));
                }
            }
        }
        cells
    }

    fn cell_of(&self, point: Vector3) -> CellKey {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
            (point.z / self.cell_size).floor() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn world_grid() -> SpatialGrid {
        SpatialGrid::new(
            BoundingBox::new(Vector3::new(-50.0, 0.0, -50.0), Vector3::new(50.0, 50.0, 50.0)),
            10.0,
        )
        .unwrap()
    }

    fn cube_at(id: &str, anchor: Vector3, edge: f64) -> PlacedObject {
        let bounds = BoundingBox::footprint(anchor, Vector3::new(edge, edge, edge));
        PlacedObject::new(id, "prop", anchor, bounds)
    }

    #[test]
    fn invalid_cell_size_rejected() {
        let bounds = BoundingBox::new(Vector3::default(), Vector3::new(10.0, 10.0, 10.0));
        assert!(matches!(
            SpatialGrid::new(bounds, 0.0),
            Err(SpatialError::InvalidCellSize(_))
        ));
        assert!(matches!(
            SpatialGrid::new(bounds, -1.0),
            Err(SpatialError::InvalidCellSize(_))
        ));
        assert!(matches!(
            SpatialGrid::new(bounds, f64::NAN),
            Err(SpatialError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let bounds = BoundingBox::new(Vector3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 10.0, 10.0));
        assert!(matches!(
            SpatialGrid::new(bounds, 10.0),
            Err(SpatialError::InvalidBounds)
        ));
    }

    #[test]
    fn overlapping_placement_rejected_without_mutation() {
        let mut grid = world_grid();
        assert!(grid.add_object(cube_at("a", Vector3::new(0.0, 0.0, 0.0), 4.0)).unwrap());

        let stats_before = grid.stats();
        let rejected = grid.add_object(cube_at("b", Vector3::new(1.0, 1.0, 1.0), 4.0));
        assert!(!rejected.unwrap());
        assert_eq!(grid.stats(), stats_before);
        assert!(grid.get("b").is_none());

        // Far enough away is accepted
        assert!(grid.add_object(cube_at("b", Vector3::new(20.0, 0.0, 0.0), 4.0)).unwrap());
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn duplicate_id_is_an_error_not_a_collision() {
        let mut grid = world_grid();
        assert!(grid.add_object(cube_at("a", Vector3::new(0.0, 0.0, 0.0), 2.0)).unwrap());
        let result = grid.add_object(cube_at("a", Vector3::new(30.0, 0.0, 0.0), 2.0));
        assert!(matches!(result, Err(SpatialError::DuplicateId(id)) if id == "a"));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn remove_restores_pre_insert_state() {
        let mut grid = world_grid();
        let empty_stats = grid.stats();

        assert!(grid.add_object(cube_at("a", Vector3::new(0.0, 0.0, 0.0), 4.0)).unwrap());
        assert!(grid.remove_object("a"));
        assert_eq!(grid.stats(), empty_stats);
        assert!(grid.get("a").is_none());

        // Unknown id is a sentinel, not an error
        assert!(!grid.remove_object("a"));
    }

    #[test]
    fn multi_cell_object_occupies_every_overlapped_bucket() {
        let mut grid = world_grid();
        // 15-unit cube spans two 10-unit cells on each horizontal axis
        assert!(grid.add_object(cube_at("big", Vector3::new(0.0, 0.0, 0.0), 15.0)).unwrap());
        assert!(grid.stats().grid_cells_used >= 8);

        assert!(grid.remove_object("big"));
        assert_eq!(grid.stats().grid_cells_used, 0);
    }

    #[test]
    fn check_collision_respects_exclusion() {
        let mut grid = world_grid();
        let obj = cube_at("a", Vector3::new(0.0, 0.0, 0.0), 4.0);
        let bounds = obj.bounds;
        assert!(grid.add_object(obj).unwrap());

        assert!(grid.check_collision(&bounds, None));
        assert!(!grid.check_collision(&bounds, Some("a")));
    }

    #[test]
    fn find_nearby_filters_by_distance_and_type() {
        let mut grid = world_grid();
        let mut npc = cube_at("npc_1", Vector3::new(3.0, 0.0, 0.0), 1.0);
        npc.entity_type = "npc".to_string();
        assert!(grid.add_object(npc).unwrap());
        assert!(grid.add_object(cube_at("rock", Vector3::new(0.0, 0.0, 4.0), 1.0)).unwrap());
        assert!(grid.add_object(cube_at("far", Vector3::new(40.0, 0.0, 40.0), 1.0)).unwrap());

        let origin = Vector3::new(0.0, 0.0, 0.0);
        let near = grid.find_nearby(origin, 5.0, None);
        assert_eq!(near.len(), 2);

        let npcs = grid.find_nearby(origin, 5.0, Some("npc"));
        assert_eq!(npcs.len(), 1);
        assert_eq!(npcs[0].id, "npc_1");

        assert!(grid.find_nearby(origin, 5.0, Some("dragon")).is_empty());
    }

    #[test]
    fn find_nearby_cube_broad_phase_does_not_leak_corners() {
        let mut grid = world_grid();
        // Inside the search cube for radius 5, but outside the sphere
        assert!(grid.add_object(cube_at("corner", Vector3::new(4.0, 4.0, 4.0), 0.5)).unwrap());
        let hits = grid.find_nearby(Vector3::new(0.0, 0.0, 0.0), 5.0, None);
        assert!(hits.is_empty());
    }

    proptest! {
        #[test]
        fn radius_queries_match_brute_force(
            points in prop::collection::vec(
                (-45.0..45.0f64, 1.0..45.0f64, -45.0..45.0f64),
                0..24,
            ),
            radius in 1.0..60.0f64,
        ) {
            let mut grid = world_grid();
            for (i, (x, y, z)) in points.iter().enumerate() {
                // Collision rejections are fine; the invariant is over whatever landed
                let _ = grid
                    .add_object(cube_at(&format!("p{i}"), Vector3::new(*x, *y, *z), 0.5))
                    .unwrap();
            }

            let origin = Vector3::new(0.0, 10.0, 0.0);
            let reported: HashSet<String> = grid
                .find_nearby(origin, radius, None)
                .into_iter()
                .map(|o| o.id.clone())
                .collect();
            let expected: HashSet<String> = grid
                .objects()
                .filter(|o| origin.distance_to(o.position) <= radius)
                .map(|o| o.id.clone())
                .collect();
            prop_assert_eq!(reported, expected);
        }
    }
}

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point or extent in 3D world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// East-west coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// North-south coordinate.
    pub z: f64,
}

impl Vector3 {
    /// Create a vector from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Vector3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// An axis-aligned 3D box.
///
/// Callers must construct boxes with `min <= max` on every axis; the
/// geometry routines do not normalize. All containment and overlap tests
/// are inclusive, so boxes that merely touch count as intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Component-wise lower corner.
    pub min: Vector3,
    /// Component-wise upper corner.
    pub max: Vector3,
}

impl BoundingBox {
    /// Create a box from its corners.
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Build the box for an object standing at `anchor` with the given size:
    /// horizontal extents centered on the anchor, vertical extent rising
    /// from the anchor's height.
    pub fn footprint(anchor: Vector3, size: Vector3) -> Self {
        let half = Vector3::new(size.x / 2.0, 0.0, size.z / 2.0);
        Self {
            min: anchor - half,
            max: anchor + Vector3::new(size.x / 2.0, size.y, size.z / 2.0),
        }
    }

    /// Inclusive point containment test.
    pub fn contains(&self, point: Vector3) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
            && self.min.z <= point.z
            && point.z <= self.max.z
    }

    /// Inclusive overlap test against another box.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

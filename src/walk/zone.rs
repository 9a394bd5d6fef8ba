//! Keep-out region around scene furniture

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular region on the ground plane the player may not
/// enter.
///
/// Only X and Z matter; the zone extends infinitely in Y. The boundary
/// itself counts as outside, so a player flush against it can slide along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoGoZone {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl NoGoZone {
    /// Create a zone from its bounds.
    #[must_use]
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Whether a world-space point lies strictly inside the zone.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.z > self.min_z && point.z < self.max_z
    }

    /// Bounds are well formed: min strictly below max on both axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x && self.min_z < self.max_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_interior_point() {
        let zone = NoGoZone::new(-2.0, 2.0, -1.0, 1.0);
        assert!(zone.contains(Vec3::new(0.0, 0.0, 0.0)));
        assert!(zone.contains(Vec3::new(1.9, 5.0, -0.9)));
    }

    #[test]
    fn test_boundary_counts_as_outside() {
        let zone = NoGoZone::new(-2.0, 2.0, -1.0, 1.0);
        assert!(!zone.contains(Vec3::new(-2.0, 0.0, 0.0)));
        assert!(!zone.contains(Vec3::new(2.0, 0.0, 0.0)));
        assert!(!zone.contains(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_exterior_point() {
        let zone = NoGoZone::new(-2.0, 2.0, -1.0, 1.0);
        assert!(!zone.contains(Vec3::new(3.0, 0.0, 0.0)));
        assert!(!zone.contains(Vec3::new(0.0, 0.0, -4.0)));
    }

    #[test]
    fn test_validity() {
        assert!(NoGoZone::new(-1.0, 1.0, -1.0, 1.0).is_valid());
        assert!(!NoGoZone::new(1.0, -1.0, -1.0, 1.0).is_valid());
        assert!(!NoGoZone::new(-1.0, 1.0, 2.0, 2.0).is_valid());
    }
}

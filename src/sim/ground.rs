//! Ground plane under the road

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Square ground quad centred on the origin that grows as the vehicle advances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    /// Growth step, normally the render distance
    pub tile: f32,
    /// Half-extent in tiles
    tiles: u32,
}

impl GroundPlane {
    pub const HEIGHT: f32 = -1.0;

    pub fn new(tile: f32) -> Self {
        Self { tile, tiles: 1 }
    }

    /// Grow until the far edge is beyond the render distance
    pub fn update(&mut self, vehicle_z: f32, render_distance: f32) {
        while vehicle_z + render_distance > self.half_extent() {
            self.tiles += 1;
        }
    }

    pub fn half_extent(&self) -> f32 {
        self.tile * self.tiles as f32
    }

    /// Corners: far right, far left, near left, near right
    pub fn corners(&self) -> [Vec3; 4] {
        let e = self.half_extent();
        [
            Vec3::new(e, Self::HEIGHT, e),
            Vec3::new(-e, Self::HEIGHT, e),
            Vec3::new(-e, Self::HEIGHT, -e),
            Vec3::new(e, Self::HEIGHT, -e),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_grows_in_tiles() {
        let mut ground = GroundPlane::new(150.0);
        ground.update(0.0, 150.0);
        assert_eq!(ground.half_extent(), 150.0);
        ground.update(0.5, 150.0);
        assert_eq!(ground.half_extent(), 300.0);
        ground.update(500.0, 150.0);
        assert_eq!(ground.half_extent(), 750.0);
        // Never shrinks
        ground.update(0.0, 150.0);
        assert_eq!(ground.half_extent(), 750.0);
        assert_eq!(ground.corners()[2], Vec3::new(-750.0, -1.0, -750.0));
    }
}

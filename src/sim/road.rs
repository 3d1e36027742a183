//! Visible road window
//!
//! Each frame the renderer walks every unit-length road segment between a
//! tunnel-length behind the vehicle and the render distance ahead of it. The
//! look-behind keeps the entrance wall of a tunnel the vehicle is inside.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::path::PathCurve;
use super::tunnel::TunnelZones;
use crate::consts::*;
use crate::settings::Settings;

/// Tessellation tier of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailTier {
    High,
    Low,
}

impl DetailTier {
    /// (horizontal, vertical) quad slices for a road segment
    pub fn tessellation(&self, quad_density: u32) -> (u32, u32) {
        match self {
            DetailTier::High => (3 * quad_density, quad_density),
            DetailTier::Low => ((3 * quad_density / 4).max(1), (quad_density / 4).max(1)),
        }
    }
}

/// One unit-length slice of road, produced per query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadSegment {
    /// Segment spans `[index, index + 1)` along z
    pub index: i32,
    pub tier: DetailTier,
    pub in_tunnel: bool,
    /// A row of trees stands on both sides at this z
    pub has_trees: bool,
}

/// Corners of a segment face, counter-clockwise seen from above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentQuad {
    pub next_right: Vec3,
    pub next_left: Vec3,
    pub this_left: Vec3,
    pub this_right: Vec3,
}

impl SegmentQuad {
    pub fn corners(&self) -> [Vec3; 4] {
        [self.next_right, self.next_left, self.this_left, self.this_right]
    }
}

/// Which side wall of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    /// +x border
    Left,
    /// -x border
    Right,
}

impl WallSide {
    fn sign(&self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

impl RoadSegment {
    /// Horizontal face across the road at `height` (0 = asphalt, tunnel height = ceiling)
    pub fn surface(&self, path: &PathCurve, height: f32) -> SegmentQuad {
        let z0 = self.index as f32;
        let z1 = z0 + 1.0;
        SegmentQuad {
            next_right: Vec3::new(path.right_border(z1), height, z1),
            next_left: Vec3::new(path.left_border(z1), height, z1),
            this_left: Vec3::new(path.left_border(z0), height, z0),
            this_right: Vec3::new(path.right_border(z0), height, z0),
        }
    }

    /// Vertical wall along one border, from the ground up to `height`
    ///
    /// Corners are wound so the face points at the road.
    pub fn wall(&self, path: &PathCurve, side: WallSide, height: f32) -> [Vec3; 4] {
        let z0 = self.index as f32;
        let z1 = z0 + 1.0;
        let x0 = path.offset(z0) + side.sign() * path.half_width;
        let x1 = path.offset(z1) + side.sign() * path.half_width;
        let next_down = Vec3::new(x1, 0.0, z1);
        let next_up = Vec3::new(x1, height, z1);
        let this_up = Vec3::new(x0, height, z0);
        let this_down = Vec3::new(x0, 0.0, z0);
        match side {
            WallSide::Right => [next_up, next_down, this_down, this_up],
            WallSide::Left => [next_down, next_up, this_up, this_down],
        }
    }

    /// Tree bases on both sides of the road, nearest rows first
    pub fn tree_positions(&self, path: &PathCurve) -> [Vec3; 2 * TREES_PER_SIDE] {
        let z = self.index as f32;
        let center = path.offset(z);
        std::array::from_fn(|i| {
            let row = (i / 2 + 1) as f32;
            let reach = path.half_width + TREE_ROW_GAP * row;
            let x = if i % 2 == 0 { center + reach } else { center - reach };
            Vec3::new(x, TREE_BASE_Y, z)
        })
    }
}

/// Enumerates the segments visible from a vehicle position
#[derive(Debug, Clone, Copy)]
pub struct RoadWindow {
    pub tunnels: TunnelZones,
    pub high_detail_distance: f32,
}

impl RoadWindow {
    pub fn new(tunnels: TunnelZones, high_detail_distance: f32) -> Self {
        Self {
            tunnels,
            high_detail_distance,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            TunnelZones::from_settings(settings),
            settings.high_detail_distance,
        )
    }

    /// Integer segments in `[vehicle_z - tunnel_length, vehicle_z + render_distance)`
    ///
    /// The sequence is lazy and built fresh on every call.
    pub fn segments(&self, vehicle_z: f32, render_distance: f32) -> RoadSegments {
        let start = (vehicle_z - self.tunnels.length).ceil() as i32;
        let end = vehicle_z + render_distance;
        RoadSegments {
            window: *self,
            vehicle_z,
            next: start,
            end,
        }
    }

    /// High detail close to the vehicle, and everywhere behind it
    pub fn tier_at(&self, index: i32, vehicle_z: f32) -> DetailTier {
        if (index as f32) - vehicle_z < self.high_detail_distance {
            DetailTier::High
        } else {
            DetailTier::Low
        }
    }

    fn has_trees(&self, index: i32, vehicle_z: f32) -> bool {
        self.tunnels.is_outside_tunnel(index as f32)
            && index.rem_euclid(TREE_SPACING) == 0
            && (index as f32) - vehicle_z < TREE_VIEW_DISTANCE
    }
}

/// Iterator returned by [`RoadWindow::segments`]
#[derive(Debug, Clone)]
pub struct RoadSegments {
    window: RoadWindow,
    vehicle_z: f32,
    next: i32,
    end: f32,
}

impl Iterator for RoadSegments {
    type Item = RoadSegment;

    fn next(&mut self) -> Option<RoadSegment> {
        let index = self.next;
        if (index as f32) >= self.end {
            return None;
        }
        self.next += 1;
        Some(RoadSegment {
            index,
            tier: self.window.tier_at(index, self.vehicle_z),
            in_tunnel: self.window.tunnels.is_inside_tunnel(index as f32),
            has_trees: self.window.has_trees(index, self.vehicle_z),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end.ceil() as i64 - self.next as i64).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RoadSegments {}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> RoadWindow {
        RoadWindow::new(TunnelZones::new(800.0, 400.0), 50.0)
    }

    #[test]
    fn test_window_bounds() {
        let segments: Vec<_> = window().segments(10.5, 150.0).collect();
        assert_eq!(segments.first().map(|s| s.index), Some(-389));
        assert_eq!(segments.last().map(|s| s.index), Some(160));
        assert_eq!(segments.len(), 550);
    }

    #[test]
    fn test_window_at_integer_position() {
        let segments: Vec<_> = window().segments(1000.0, 150.0).collect();
        assert_eq!(segments[0].index, 600);
        assert_eq!(segments.last().unwrap().index, 1149);
        assert_eq!(window().segments(1000.0, 150.0).len(), segments.len());
    }

    #[test]
    fn test_detail_tiers() {
        let w = window();
        let tiers: Vec<_> = w.segments(100.0, 150.0).map(|s| (s.index, s.tier)).collect();
        for (index, tier) in tiers {
            let expected = if index < 150 {
                DetailTier::High
            } else {
                DetailTier::Low
            };
            assert_eq!(tier, expected, "segment {index}");
        }
    }

    #[test]
    fn test_tunnel_flags() {
        let w = window();
        for segment in w.segments(900.0, 150.0) {
            let expected = segment.index >= 800 && segment.index < 1200;
            assert_eq!(segment.in_tunnel, expected, "segment {}", segment.index);
        }
    }

    #[test]
    fn test_query_is_restartable() {
        let w = window();
        let first: Vec<_> = w.segments(321.7, 150.0).collect();
        let second: Vec<_> = w.segments(321.7, 150.0).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_trees_only_on_open_road_ahead() {
        let w = window();
        let with_trees: Vec<_> = w
            .segments(700.0, 150.0)
            .filter(|s| s.has_trees)
            .map(|s| s.index)
            .collect();
        assert!(with_trees.iter().all(|z| z % 15 == 0));
        assert!(with_trees.iter().all(|&z| z < 800));
        assert!(with_trees.contains(&300));
        assert!(with_trees.contains(&795));
    }

    #[test]
    fn test_tessellation() {
        assert_eq!(DetailTier::High.tessellation(4), (12, 4));
        assert_eq!(DetailTier::Low.tessellation(4), (3, 1));
        assert_eq!(DetailTier::Low.tessellation(2), (1, 1));
    }

    #[test]
    fn test_surface_spans_road_width() {
        let path = PathCurve::new(10.0, 300.0, 8.0);
        let segment = RoadSegment {
            index: 75,
            tier: DetailTier::High,
            in_tunnel: false,
            has_trees: true,
        };
        let quad = segment.surface(&path, 0.0);
        assert!((quad.this_left.x - quad.this_right.x - 16.0).abs() < 1e-4);
        assert_eq!(quad.next_left.z, 76.0);

        let trees = segment.tree_positions(&path);
        assert!((trees[0].x - (path.offset(75.0) + 12.5)).abs() < 1e-4);
        assert!((trees[1].x - (path.offset(75.0) - 12.5)).abs() < 1e-4);
        assert!((trees[5].x - (path.offset(75.0) - 21.5)).abs() < 1e-4);
        assert!(trees.iter().all(|t| t.y == TREE_BASE_Y));

        let wall = segment.wall(&path, WallSide::Left, 4.0);
        assert!(wall.iter().all(|c| (c.x - path.left_border(c.z)).abs() < 1e-4));
        assert_eq!((wall[0].y, wall[0].z), (0.0, 76.0));
        assert_eq!((wall[1].y, wall[1].z), (4.0, 76.0));
        assert_eq!((wall[2].y, wall[2].z), (4.0, 75.0));

        // Right wall runs the other way round so it also faces the road
        let wall = segment.wall(&path, WallSide::Right, 4.0);
        assert!(wall.iter().all(|c| (c.x - path.right_border(c.z)).abs() < 1e-4));
        assert_eq!((wall[0].y, wall[0].z), (4.0, 76.0));
        assert_eq!((wall[1].y, wall[1].z), (0.0, 76.0));
        assert_eq!((wall[2].y, wall[2].z), (0.0, 75.0));
        assert_eq!((wall[3].y, wall[3].z), (4.0, 75.0));
    }
}

//! Tunnel zones
//!
//! Tunnels repeat forever along z: `spacing` units of open road followed by
//! `length` units of tunnel. Everything at or behind the origin is open road.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Repeating open-road / tunnel pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunnelZones {
    /// Open road between the end of one tunnel and the next entrance
    pub spacing: f32,
    /// Tunnel length; must be shorter than `spacing`
    pub length: f32,
}

impl TunnelZones {
    pub fn new(spacing: f32, length: f32) -> Self {
        debug_assert!(length < spacing, "degenerate tunnel interval");
        Self { spacing, length }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tunnel_spacing, settings.tunnel_length)
    }

    /// Length of one open-road + tunnel cycle
    #[inline]
    pub fn period(&self) -> f32 {
        self.spacing + self.length
    }

    /// True on open road. A point exactly at a tunnel entrance is inside.
    #[inline]
    pub fn is_outside_tunnel(&self, z: f32) -> bool {
        z <= 0.0 || z.rem_euclid(self.period()) < self.spacing
    }

    #[inline]
    pub fn is_inside_tunnel(&self, z: f32) -> bool {
        !self.is_outside_tunnel(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zones() -> TunnelZones {
        TunnelZones::new(800.0, 400.0)
    }

    #[test]
    fn test_entrance_boundary_is_inside() {
        let tunnels = zones();
        assert!(tunnels.is_outside_tunnel(799.0));
        assert!(!tunnels.is_outside_tunnel(800.0));
        assert!(!tunnels.is_outside_tunnel(1199.0));
        assert!(tunnels.is_outside_tunnel(1200.0));
    }

    #[test]
    fn test_behind_origin_is_open_road() {
        let tunnels = zones();
        assert!(tunnels.is_outside_tunnel(0.0));
        assert!(tunnels.is_outside_tunnel(-400.0));
        assert!(tunnels.is_outside_tunnel(-1000.0));
    }

    proptest! {
        #[test]
        fn prop_pattern_repeats(z in 1u32..1_000_000) {
            let tunnels = zones();
            let z = z as f32;
            prop_assert_eq!(
                tunnels.is_outside_tunnel(z),
                tunnels.is_outside_tunnel(z + tunnels.period())
            );
            prop_assert_ne!(tunnels.is_outside_tunnel(z), tunnels.is_inside_tunnel(z));
        }

        #[test]
        fn prop_open_run_has_spacing_length(cycle in 1u32..500, k in 0u32..1200) {
            let tunnels = zones();
            let z = (cycle * 1200 + k) as f32;
            prop_assert_eq!(tunnels.is_outside_tunnel(z), k < 800);
        }
    }
}

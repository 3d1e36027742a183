//! Road centerline
//!
//! The road follows a sine wave along z. It is shifted by a quarter period so
//! the curve sits at its minimum at z = 0, which gives a straight-feeling
//! launch.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::settings::Settings;

/// Lateral offset of the road centerline as a function of z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathCurve {
    pub amplitude: f32,
    pub period: f32,
    /// Distance from the centerline to either border
    pub half_width: f32,
}

impl PathCurve {
    pub fn new(amplitude: f32, period: f32, half_width: f32) -> Self {
        Self {
            amplitude,
            period,
            half_width,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.road_amplitude,
            settings.road_period,
            settings.road_half_width,
        )
    }

    /// Centerline x at `z`; always within `[0, 2 * amplitude]`
    #[inline]
    pub fn offset(&self, z: f32) -> f32 {
        self.amplitude + self.amplitude * (TAU * (z - self.period / 4.0) / self.period).sin()
    }

    /// Border on the +x side
    #[inline]
    pub fn left_border(&self, z: f32) -> f32 {
        self.offset(z) + self.half_width
    }

    /// Border on the -x side
    #[inline]
    pub fn right_border(&self, z: f32) -> f32 {
        self.offset(z) - self.half_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn curve() -> PathCurve {
        PathCurve::new(10.0, 300.0, 8.0)
    }

    #[test]
    fn test_quarter_period_checkpoints() {
        let path = curve();
        assert!(path.offset(0.0).abs() < 1e-4);
        assert!((path.offset(75.0) - 10.0).abs() < 1e-4);
        assert!((path.offset(150.0) - 20.0).abs() < 1e-4);
        assert!((path.offset(225.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_z_is_defined() {
        let path = curve();
        assert!((path.offset(-300.0) - path.offset(0.0)).abs() < 1e-3);
        assert!((path.offset(-150.0) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_borders_straddle_centerline() {
        let path = curve();
        let z = 42.0;
        assert!((path.left_border(z) - path.offset(z) - 8.0).abs() < 1e-5);
        assert!((path.offset(z) - path.right_border(z) - 8.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_offset_is_periodic(z in -10_000.0f32..10_000.0) {
            let path = curve();
            prop_assert!((path.offset(z) - path.offset(z + path.period)).abs() < 1e-2);
        }

        #[test]
        fn prop_offset_is_bounded(z in -100_000.0f32..100_000.0) {
            let path = curve();
            let x = path.offset(z);
            prop_assert!(x >= -1e-4 && x <= 2.0 * path.amplitude + 1e-4);
        }
    }
}

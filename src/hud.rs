//! HUD readouts
//!
//! Numbers only; the host draws the text and the wind arrow.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::sim::SessionState;

/// Frames-per-second counter, refreshed once per full second
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    frames: u32,
    window_start: f32,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frames: 0,
            window_start: 0.0,
            fps: TICK_RATE,
        }
    }
}

impl FpsCounter {
    /// Count a presented frame at `now` seconds
    pub fn frame(&mut self, now: f32) {
        self.frames += 1;
        if now - self.window_start >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Values shown in the corner of the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudReadout {
    pub speed: f32,
    /// Whole seconds since the start, rounded
    pub elapsed_secs: u32,
    /// Distance travelled along the road, truncated
    pub distance: i32,
    pub fps: u32,
    /// Wind arrow rotation in degrees
    pub wind_arrow: f32,
}

impl HudReadout {
    pub fn capture(state: &SessionState, fps: &FpsCounter) -> Self {
        Self {
            speed: state.vehicle.speed,
            elapsed_secs: (state.elapsed_secs + 0.5) as u32,
            distance: state.vehicle.position.z as i32,
            fps: fps.fps(),
            wind_arrow: wind_arrow_angle(state.rain.wind(), state.vehicle.heading),
        }
    }
}

/// Angle in degrees between the wind and the heading on the x-z plane
///
/// Mirrored to `360 - a` when the heading points further toward +x than the
/// wind, so the arrow turns the right way. Degenerate vectors give 0.
pub fn wind_arrow_angle(wind: Vec3, heading: Vec3) -> f32 {
    let dot = wind.x * heading.x + wind.z * heading.z;
    let wind_len = (wind.x * wind.x + wind.z * wind.z).sqrt();
    let heading_len = (heading.x * heading.x + heading.z * heading.z).sqrt();
    let mags = wind_len * heading_len;
    if mags <= f32::EPSILON {
        return 0.0;
    }
    let angle = (dot / mags).clamp(-1.0, 1.0).acos().to_degrees();
    if heading.x > wind.x { 360.0 - angle } else { angle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_fps_counter() {
        let mut counter = FpsCounter::default();
        assert_eq!(counter.fps(), TICK_RATE);
        for i in 1..=30 {
            counter.frame(i as f32 / 30.0);
        }
        assert_eq!(counter.fps(), 30);
    }

    #[test]
    fn test_wind_arrow() {
        assert!(wind_arrow_angle(Vec3::new(0.0, -1.0, 1.0), Vec3::Z).abs() < 1e-3);
        assert!((wind_arrow_angle(Vec3::new(0.0, -1.0, -1.0), Vec3::Z) - 180.0).abs() < 1e-3);
        // Wind blowing toward -x while heading straight: heading.x > wind.x mirrors
        assert!((wind_arrow_angle(Vec3::new(-1.0, -1.0, 0.0), Vec3::Z) - 270.0).abs() < 1e-3);
        assert_eq!(wind_arrow_angle(Vec3::NEG_Y, Vec3::Z), 0.0);
    }

    #[test]
    fn test_capture() {
        let mut state = SessionState::new(Settings::default());
        state.elapsed_secs = 2.6;
        state.vehicle.position.z = 123.9;
        state.vehicle.speed = 12.0;
        let hud = HudReadout::capture(&state, &FpsCounter::default());
        assert_eq!(hud.elapsed_secs, 3);
        assert_eq!(hud.distance, 123);
        assert_eq!(hud.speed, 12.0);
        assert!((0.0..=360.0).contains(&hud.wind_arrow));
    }
}

//! Rain
//!
//! A fixed pool of raindrops falls around the rider. Drop positions are kept
//! relative to the vehicle's z so the shower travels with it. Drops over a
//! tunnel are hidden and left alone until the rider is back on open road.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::tunnel::TunnelZones;
use crate::consts::*;

/// Converts drop speed and wind into units per second
const DRIFT_SCALE: f32 = TICK_RATE as f32 / 1000.0;

/// A single falling streak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    /// x and y absolute, z relative to the vehicle
    pub position: Vec3,
    pub speed: f32,
    pub length: f32,
}

/// Line segment to draw for a visible drop, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainStreak {
    pub start: Vec3,
    pub end: Vec3,
}

/// Rain pool and wind
#[derive(Debug, Clone)]
pub struct RainField {
    drops: Vec<Raindrop>,
    wind: Vec3,
    /// Drops respawn between 1 and this far ahead of the rider
    reach: f32,
    rng: Pcg32,
}

impl RainField {
    pub fn new(seed: u64, count: usize, render_distance: f32) -> Self {
        let mut field = Self {
            drops: Vec::with_capacity(count),
            wind: Vec3::NEG_Y,
            reach: (render_distance / 3.0).max(1.0),
            rng: Pcg32::seed_from_u64(seed),
        };
        field.change_wind();
        for _ in 0..count {
            let drop = field.spawn_drop();
            field.drops.push(drop);
        }
        field
    }

    fn spawn_drop(&mut self) -> Raindrop {
        let speed = self.rng.random_range(MIN_RAINDROP_SPEED..=MAX_RAINDROP_SPEED) as f32;
        let reach = self.reach as i32;
        Raindrop {
            position: Vec3::new(
                self.rng.random_range(-20..=20) as f32,
                self.rng.random_range(3..=7) as f32,
                self.rng.random_range(1..=reach) as f32,
            ),
            speed,
            length: speed / (MAX_RAINDROP_SPEED as f32 * 3.0),
        }
    }

    /// Pick a new random wind; rain always falls
    pub fn change_wind(&mut self) {
        let a = self.rng.random_range(0.0..TAU);
        let b = self.rng.random_range(0.0..TAU);
        self.wind = Vec3::new(a.sin(), -1.0, b.cos());
        log::debug!("Wind changed to {:?}", self.wind);
    }

    pub fn wind(&self) -> Vec3 {
        self.wind
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    /// Move every drop; drops that hit the ground on open road respawn
    pub fn update(&mut self, dt: f32, vehicle_z: f32, tunnels: &TunnelZones) {
        let wind = self.wind;
        for i in 0..self.drops.len() {
            let raindrop = &mut self.drops[i];
            raindrop.position += wind * raindrop.speed * dt * DRIFT_SCALE;
            if tunnels.is_inside_tunnel(raindrop.position.z + vehicle_z) {
                continue;
            }
            if raindrop.position.y <= 0.0 {
                self.drops[i] = self.spawn_drop();
            }
        }
    }

    /// World-space streaks for drops over open road
    pub fn streaks<'a>(
        &'a self,
        vehicle_z: f32,
        tunnels: &'a TunnelZones,
    ) -> impl Iterator<Item = RainStreak> + 'a {
        self.drops
            .iter()
            .filter(move |d| tunnels.is_outside_tunnel(d.position.z + vehicle_z))
            .map(move |d| {
                let start = d.position + Vec3::new(0.0, 0.0, vehicle_z);
                RainStreak {
                    start,
                    end: start + self.wind * d.length,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tunnels() -> TunnelZones {
        TunnelZones::new(800.0, 400.0)
    }

    #[test]
    fn test_spawn_ranges() {
        let rain = RainField::new(7, 500, 150.0);
        assert_eq!(rain.drops().len(), 500);
        for d in rain.drops() {
            assert!((-20.0..=20.0).contains(&d.position.x));
            assert!((3.0..=7.0).contains(&d.position.y));
            assert!((1.0..=50.0).contains(&d.position.z));
            assert!((50.0..=500.0).contains(&d.speed));
            assert!((d.length - d.speed / 1500.0).abs() < 1e-6);
        }
        assert_eq!(rain.wind().y, -1.0);
    }

    #[test]
    fn test_same_seed_same_rain() {
        let mut a = RainField::new(42, 100, 150.0);
        let mut b = RainField::new(42, 100, 150.0);
        for _ in 0..120 {
            a.update(1.0 / 60.0, 10.0, &tunnels());
            b.update(1.0 / 60.0, 10.0, &tunnels());
        }
        assert_eq!(a.drops(), b.drops());
    }

    #[test]
    fn test_drops_respawn_after_landing() {
        let mut rain = RainField::new(3, 200, 150.0);
        for _ in 0..2000 {
            rain.update(1.0 / 60.0, 0.0, &tunnels());
            assert!(rain.drops().iter().all(|d| d.position.y > -10.0));
        }
    }

    #[test]
    fn test_no_streaks_inside_tunnel() {
        let rain = RainField::new(5, 300, 150.0);
        assert_eq!(rain.streaks(900.0, &tunnels()).count(), 0);
        assert_eq!(rain.streaks(100.0, &tunnels()).count(), 300);
        let streak = rain.streaks(100.0, &tunnels()).next().unwrap();
        assert!(streak.start.z > 100.0);
        assert!(streak.end.y < streak.start.y);
    }
}

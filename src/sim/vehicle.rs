//! Vehicle state and driver controls

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::heading_from_angle;
use crate::settings::Settings;

/// Discrete driver input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverCommand {
    Accelerate,
    Decelerate,
    TurnLeft,
    TurnRight,
}

/// Speed and steering limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveLimits {
    pub max_speed: f32,
    pub speed_increment: f32,
    /// Degrees
    pub max_angle: f32,
    /// Degrees
    pub angle_increment: f32,
}

impl Default for DriveLimits {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_angle: MAX_ANGLE,
            angle_increment: ANGLE_INCREMENT,
        }
    }
}

impl DriveLimits {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_speed: settings.max_speed,
            speed_increment: settings.speed_increment,
            max_angle: settings.max_angle,
            angle_increment: settings.angle_increment,
        }
    }
}

/// The rider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub position: Vec3,
    /// Unit direction of travel in the x-z plane
    pub heading: Vec3,
    /// Units per second, within `[0, max_speed]`
    pub speed: f32,
    /// Degrees, positive turns toward +x
    pub turn_angle: f32,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, PLAYER_Y, 0.0),
            heading: Vec3::Z,
            speed: 0.0,
            turn_angle: 0.0,
        }
    }
}

impl VehicleState {
    /// Apply one driver command and refresh the heading
    pub fn apply(&mut self, command: DriverCommand, limits: &DriveLimits) {
        match command {
            DriverCommand::Accelerate => {
                self.speed = (self.speed + limits.speed_increment).min(limits.max_speed);
            }
            DriverCommand::Decelerate => {
                self.speed = (self.speed - limits.speed_increment).max(0.0);
            }
            DriverCommand::TurnLeft => {
                self.turn_angle = (self.turn_angle + limits.angle_increment)
                    .clamp(-limits.max_angle, limits.max_angle);
            }
            DriverCommand::TurnRight => {
                self.turn_angle = (self.turn_angle - limits.angle_increment)
                    .clamp(-limits.max_angle, limits.max_angle);
            }
        }
        self.heading = heading_from_angle(self.turn_angle);
    }

    /// Heading with a usable length; degenerate headings fall back to +z
    pub fn guarded_heading(&self) -> Vec3 {
        if self.heading.length() < MIN_HEADING {
            Vec3::Z
        } else {
            self.heading
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_clamps() {
        let limits = DriveLimits::default();
        let mut vehicle = VehicleState::default();
        vehicle.apply(DriverCommand::Decelerate, &limits);
        assert_eq!(vehicle.speed, 0.0);

        for _ in 0..200 {
            vehicle.apply(DriverCommand::Accelerate, &limits);
        }
        assert_eq!(vehicle.speed, MAX_SPEED);

        vehicle.speed = 0.3;
        vehicle.apply(DriverCommand::Decelerate, &limits);
        assert_eq!(vehicle.speed, 0.0);
    }

    #[test]
    fn test_turn_clamps_and_heading() {
        let limits = DriveLimits::default();
        let mut vehicle = VehicleState::default();
        for _ in 0..500 {
            vehicle.apply(DriverCommand::TurnRight, &limits);
        }
        assert_eq!(vehicle.turn_angle, -MAX_ANGLE);
        assert!(vehicle.heading.x < 0.0);
        assert!((vehicle.heading.length() - 1.0).abs() < 1e-5);
        assert!((vehicle.heading.x + vehicle.heading.z).abs() < 1e-5);

        vehicle.apply(DriverCommand::TurnLeft, &limits);
        assert_eq!(vehicle.turn_angle, -MAX_ANGLE + ANGLE_INCREMENT);
    }

    #[test]
    fn test_degenerate_heading_guard() {
        let vehicle = VehicleState {
            heading: Vec3::ZERO,
            ..Default::default()
        };
        assert_eq!(vehicle.guarded_heading(), Vec3::Z);
    }
}

//! Road border guidance
//!
//! The only contact the vehicle ever makes is with the road border. On contact
//! the bike loses half its speed and skids sideways toward the centerline
//! instead of moving forward, so it stalls against the wall rather than
//! bouncing off it.

use serde::{Deserialize, Serialize};

use super::path::PathCurve;
use super::vehicle::VehicleState;
use crate::consts::*;
use crate::settings::Settings;

/// What happened to the vehicle during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderContact {
    /// Candidate position was accepted (or guidance is disabled)
    Clear,
    /// Candidate left the drivable band; speed was cut and the bike skidded
    Skid,
}

/// Result of a guided step
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    pub vehicle: VehicleState,
    pub contact: BorderContact,
}

/// Keeps the vehicle between the road borders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionGuide {
    pub path: PathCurve,
    /// Inward margin from each border
    pub margin: f32,
    pub skid_stop_speed: f32,
    pub push_factor: f32,
}

impl CollisionGuide {
    pub fn new(path: PathCurve, margin: f32) -> Self {
        Self {
            path,
            margin,
            skid_stop_speed: SKID_STOP_SPEED,
            push_factor: SKID_PUSH_FACTOR,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(PathCurve::from_settings(settings), settings.border_margin)
    }

    /// Strictly inside the drivable band at `z`; the band edges themselves are out
    pub fn inside_road_border(&self, x: f32, z: f32) -> bool {
        let center = self.path.offset(z);
        let low = center - self.path.half_width + self.margin;
        let high = center + self.path.half_width - self.margin;
        x > low && x < high
    }

    /// Advance the vehicle by `elapsed` seconds
    pub fn step(&self, vehicle: &VehicleState, elapsed: f32, enabled: bool) -> VehicleState {
        self.step_with_contact(vehicle, elapsed, enabled).vehicle
    }

    pub fn step_with_contact(
        &self,
        vehicle: &VehicleState,
        elapsed: f32,
        enabled: bool,
    ) -> StepResult {
        let heading = vehicle.guarded_heading();
        let displacement = elapsed * vehicle.speed;
        let next = vehicle.position + heading * displacement;

        if !enabled || self.inside_road_border(next.x, next.z) {
            return StepResult {
                vehicle: VehicleState {
                    position: next,
                    ..*vehicle
                },
                contact: BorderContact::Clear,
            };
        }

        let mut skidded = *vehicle;
        skidded.speed = if vehicle.speed > self.skid_stop_speed {
            vehicle.speed / 2.0
        } else {
            0.0
        };
        let displacement = elapsed * skidded.speed;
        let center = self.path.offset(vehicle.position.z);
        let push = displacement * center * self.push_factor;
        if vehicle.position.x < center {
            skidded.position.x += push;
        } else {
            skidded.position.x -= push;
        }

        log::trace!(
            "Border contact at z={:.2}: speed {:.2} -> {:.2}",
            vehicle.position.z,
            vehicle.speed,
            skidded.speed
        );

        StepResult {
            vehicle: skidded,
            contact: BorderContact::Skid,
        }
    }
}

//! Session state
//!
//! Everything that changes while riding lives in [`SessionState`]: the
//! vehicle, the lamp ring, the scenery and the display modes the host toggles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::CollisionGuide;
use super::ground::GroundPlane;
use super::path::PathCurve;
use super::road::{DetailTier, RoadSegments, RoadWindow};
use super::roadside::{RoadsideCycler, SLOT_COUNT, SlotPlacement};
use super::tunnel::TunnelZones;
use super::vehicle::{DriveLimits, VehicleState};
use super::weather::RainField;
use crate::consts::*;
use crate::settings::Settings;

/// Camera placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// From the rider's eyes
    #[default]
    Player,
    /// Slightly above and behind
    ThirdPerson,
    /// High above the road, looking down the heading
    BirdsEye,
}

/// Look-at parameters for the host's view transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraMode {
    /// Player -> ThirdPerson -> BirdsEye -> Player
    pub fn next(self) -> Self {
        match self {
            CameraMode::Player => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::BirdsEye,
            CameraMode::BirdsEye => CameraMode::Player,
        }
    }

    /// The headlight is off when looking from above
    pub fn headlight(&self) -> bool {
        !matches!(self, CameraMode::BirdsEye)
    }

    pub fn view(&self, vehicle: &VehicleState) -> CameraView {
        let p = vehicle.position;
        let h = vehicle.heading;
        let (eye, target) = match self {
            CameraMode::ThirdPerson => (
                Vec3::new(p.x, THIRD_PERSON_Y, p.z),
                Vec3::new(p.x + h.x, THIRD_PERSON_Y / 2.0 + 1.0, p.z + h.z),
            ),
            CameraMode::Player | CameraMode::BirdsEye => {
                (p, Vec3::new(p.x + h.x, 1.0, p.z + h.z))
            }
        };
        CameraView {
            eye,
            target,
            up: Vec3::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rainfall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    Solid,
    Wireframe,
}

/// Display and behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionModes {
    pub camera: CameraMode,
    pub weather: Weather,
    pub draw: DrawMode,
    pub collisions: bool,
    pub hud: bool,
    pub axes: bool,
    pub fog: bool,
    /// Night lighting (lamps and headlight); off means daylight
    pub lighting: bool,
}

impl Default for SessionModes {
    fn default() -> Self {
        Self {
            camera: CameraMode::Player,
            weather: Weather::Clear,
            draw: DrawMode::Solid,
            collisions: true,
            hud: true,
            axes: true,
            fog: false,
            lighting: false,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    pub settings: Settings,
    pub path: PathCurve,
    pub tunnels: TunnelZones,
    pub window: RoadWindow,
    pub guide: CollisionGuide,
    pub limits: DriveLimits,
    pub vehicle: VehicleState,
    pub roadside: RoadsideCycler,
    pub ground: GroundPlane,
    pub rain: RainField,
    pub modes: SessionModes,
    /// Seconds since the session started
    pub elapsed_secs: f32,
    /// Ticks run so far
    pub time_ticks: u64,
    /// Tunnel state at the end of the previous tick
    pub(crate) in_tunnel: bool,
}

impl SessionState {
    /// Fresh session: vehicle at the origin, lamps one to four spacings ahead
    pub fn new(settings: Settings) -> Self {
        log::info!(
            "Session starting: road A={} P={}, tunnels every {} (length {}), lamps every {}",
            settings.road_amplitude,
            settings.road_period,
            settings.tunnel_spacing,
            settings.tunnel_length,
            settings.lamp_spacing
        );
        Self {
            path: PathCurve::from_settings(&settings),
            tunnels: TunnelZones::from_settings(&settings),
            window: RoadWindow::from_settings(&settings),
            guide: CollisionGuide::from_settings(&settings),
            limits: DriveLimits::from_settings(&settings),
            vehicle: VehicleState::default(),
            roadside: RoadsideCycler::from_settings(&settings),
            ground: GroundPlane::new(settings.render_distance),
            rain: RainField::new(
                settings.seed,
                settings.quality.raindrops(),
                settings.render_distance,
            ),
            modes: SessionModes::default(),
            elapsed_secs: 0.0,
            time_ticks: 0,
            in_tunnel: false,
            settings,
        }
    }

    /// Road segments to draw this frame
    pub fn segments(&self) -> RoadSegments {
        self.window
            .segments(self.vehicle.position.z, self.settings.render_distance)
    }

    /// (horizontal, vertical) quad slices for a segment at the current quality
    pub fn tessellation(&self, tier: DetailTier) -> (u32, u32) {
        tier.tessellation(self.settings.quality.quad_density())
    }

    /// Lamp and sign placements to draw this frame
    pub fn lamps(&self) -> [SlotPlacement; SLOT_COUNT] {
        self.roadside.query()
    }

    pub fn camera(&self) -> CameraView {
        self.modes.camera.view(&self.vehicle)
    }

    pub fn in_tunnel(&self) -> bool {
        self.in_tunnel
    }

    /// Move to the next camera mode and set the eye height it needs
    pub fn cycle_camera(&mut self) {
        self.modes.camera = self.modes.camera.next();
        match self.modes.camera {
            CameraMode::BirdsEye => self.vehicle.position.y = BIRDS_EYE_Y,
            CameraMode::Player => self.vehicle.position.y = PLAYER_Y,
            CameraMode::ThirdPerson => {}
        }
        log::info!("Camera: {:?}", self.modes.camera);
    }
}

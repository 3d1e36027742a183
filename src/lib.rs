//! Night Highway - an endless procedural highway scene
//!
//! Core modules:
//! - `sim`: Scene simulation (road path, tunnels, roadside lamps, guidance)
//! - `settings`: Session configuration surface
//! - `hud`: Numeric HUD readouts (text rendering is left to the host)

pub mod hud;
pub mod settings;
pub mod sim;

pub use hud::{FpsCounter, HudReadout};
pub use settings::{QualityPreset, Settings};

/// Scene configuration defaults
pub mod consts {
    /// Ticks per second the host is expected to drive
    pub const TICK_RATE: u32 = 60;

    /// Speed change per accelerate/decelerate command (units/s)
    pub const SPEED_INCREMENT: f32 = 0.4;
    pub const MAX_SPEED: f32 = 30.0;
    /// Turn change per steering command (degrees)
    pub const ANGLE_INCREMENT: f32 = 0.5;
    pub const MAX_ANGLE: f32 = 45.0;

    /// Road centerline swing and wavelength
    pub const ROAD_AMPLITUDE: f32 = 10.0;
    pub const ROAD_PERIOD: f32 = 300.0;
    /// Distance from the centerline to either border
    pub const ROAD_HALF_WIDTH: f32 = 8.0;
    pub const ROAD_BORDER_HEIGHT: f32 = 0.4;
    /// Inward margin of the drivable band (keeps the bike off the border wall)
    pub const BORDER_MARGIN: f32 = 0.7;
    pub const RENDER_DISTANCE: f32 = 150.0;
    pub const HIGH_DETAIL_DISTANCE: f32 = 50.0;
    pub const QUAD_DENSITY: u32 = 4;

    /// Open road between two tunnels
    pub const TUNNEL_SPACING: f32 = 800.0;
    pub const TUNNEL_LENGTH: f32 = 400.0;
    pub const TUNNEL_HEIGHT: f32 = 4.0;

    pub const LAMP_COUNT: usize = 4;
    pub const LAMP_HEIGHT: f32 = TUNNEL_HEIGHT;
    pub const LAMP_SPACING: f32 = RENDER_DISTANCE / LAMP_COUNT as f32;
    /// Lamp advances between two signs
    pub const SIGN_CADENCE: u32 = 5;
    pub const SIGN_HEIGHT: f32 = 4.0;

    /// Trees line the road every `TREE_SPACING` units outside tunnels
    pub const TREE_SPACING: i32 = 15;
    pub const TREE_ROW_GAP: f32 = 4.5;
    pub const TREES_PER_SIDE: usize = 3;
    pub const TREE_VIEW_DISTANCE: f32 = 100.0;
    pub const TREE_BASE_Y: f32 = -2.0;

    /// Below this speed a border contact stops the vehicle outright
    pub const SKID_STOP_SPEED: f32 = 2.0;
    /// Lateral push toward the centerline per unit of displacement and offset
    pub const SKID_PUSH_FACTOR: f32 = 0.2;
    /// Shorter headings are treated as straight ahead
    pub const MIN_HEADING: f32 = 1e-4;

    /// Eye heights per camera mode
    pub const PLAYER_Y: f32 = 1.0;
    pub const THIRD_PERSON_Y: f32 = 2.0;
    pub const BIRDS_EYE_Y: f32 = 50.0;

    pub const RAINDROP_COUNT: usize = 3000;
    pub const MIN_RAINDROP_SPEED: u32 = 50;
    pub const MAX_RAINDROP_SPEED: u32 = 500;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Heading in the x-z plane for a turn angle in degrees
#[inline]
pub fn heading_from_angle(degrees: f32) -> glam::Vec3 {
    let rad = deg_to_rad(degrees);
    glam::Vec3::new(rad.sin(), 0.0, rad.cos())
}

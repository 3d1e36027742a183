//! Scene simulation module
//!
//! All per-tick logic lives here. Nothing in this module renders or touches
//! the platform:
//! - Single writer: `tick` mutates, rendering only queries afterwards
//! - Seeded RNG only (rain)
//! - Fixed-size coordinates, no allocation in the per-frame queries

pub mod collision;
pub mod ground;
pub mod path;
pub mod road;
pub mod roadside;
pub mod state;
pub mod tick;
pub mod tunnel;
pub mod vehicle;
pub mod weather;

pub use collision::{BorderContact, CollisionGuide, StepResult};
pub use ground::GroundPlane;
pub use path::PathCurve;
pub use road::{DetailTier, RoadSegment, RoadSegments, RoadWindow, SegmentQuad, WallSide};
pub use roadside::{RoadsideCycler, SLOT_COUNT, Side, SignVariant, SlotPlacement, Support, sign_panel};
pub use state::{CameraMode, CameraView, DrawMode, SessionModes, SessionState, Weather};
pub use tick::{TickInput, TickReport, tick};
pub use tunnel::TunnelZones;
pub use vehicle::{DriveLimits, DriverCommand, VehicleState};
pub use weather::{RainField, RainStreak, Raindrop};

//! Recycling streetlamps and signs
//!
//! Four lamp slots are reused for the whole session. When the vehicle passes
//! the midpoint beyond the nearest-behind lamp, that slot jumps to the far end
//! of the ring. A separate counter turns one recycled slot into a sign gantry
//! once `sign_cadence` lamps have gone by without one; the sign stays until its
//! slot comes round again, and the count restarts when it is retired.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::path::PathCurve;
use super::tunnel::TunnelZones;
use crate::consts::*;
use crate::settings::Settings;

/// Number of slots in the ring
pub const SLOT_COUNT: usize = LAMP_COUNT;

/// Which side of the road a lamp stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// +x border
    Left,
    /// -x border
    Right,
}

impl Side {
    /// Slots alternate sides, starting on the left
    pub fn of_slot(slot: usize) -> Self {
        if slot % 2 == 0 { Side::Left } else { Side::Right }
    }
}

/// What holds the lamp up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Support {
    /// Single pole at the road border
    Pole,
    /// Two poles spanning the road carrying a sign panel
    SignGantry,
    /// Hung from the tunnel ceiling; the tunnel geometry is the support
    Tunnel,
}

/// Sign panel artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignVariant {
    WelcomeToParadise,
    PainIsNatural,
    NoIndependence,
    Consume,
    MarryAndReproduce,
    Obey,
}

impl SignVariant {
    /// Shown after the two welcome signs, cycling
    pub const ROTATION: [SignVariant; 4] = [
        SignVariant::NoIndependence,
        SignVariant::Consume,
        SignVariant::MarryAndReproduce,
        SignVariant::Obey,
    ];

    /// Panel for the sign shown after `signs_shown` earlier ones
    pub fn for_count(signs_shown: u32) -> Self {
        match signs_shown {
            0 => SignVariant::WelcomeToParadise,
            1 => SignVariant::PainIsNatural,
            n => Self::ROTATION[(n % 4) as usize],
        }
    }
}

/// Where and how to draw one slot this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotPlacement {
    pub slot: usize,
    /// Light position (lamp head)
    pub position: Vec3,
    /// Spotlight direction
    pub light_direction: Vec3,
    pub side: Side,
    pub support: Support,
    /// This slot currently hosts the sign
    pub is_sign: bool,
    /// Panel to draw; only set when the sign gantry is actually visible
    pub sign: Option<SignVariant>,
}

/// Four-slot lamp ring plus sign cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadsideCycler {
    path: PathCurve,
    tunnels: TunnelZones,
    spacing: f32,
    cadence: u32,
    /// Slot z positions
    positions: [f32; SLOT_COUNT],
    /// Slot nearest behind the vehicle
    first: usize,
    since_last_sign: u32,
    sign_index: Option<usize>,
    signs_shown: u32,
}

impl RoadsideCycler {
    /// Ring with lamps at one to four spacings ahead of the origin
    pub fn new(path: PathCurve, tunnels: TunnelZones, spacing: f32, cadence: u32) -> Self {
        Self {
            path,
            tunnels,
            spacing,
            cadence,
            positions: std::array::from_fn(|i| (i + 1) as f32 * spacing),
            first: 0,
            since_last_sign: 0,
            sign_index: None,
            signs_shown: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            PathCurve::from_settings(settings),
            TunnelZones::from_settings(settings),
            settings.lamp_spacing,
            settings.sign_cadence,
        )
    }

    /// Recycle every slot the vehicle has passed. Returns how many moved.
    ///
    /// Calling again with the same `vehicle_z` changes nothing.
    pub fn advance(&mut self, vehicle_z: f32) -> u32 {
        debug_assert!(vehicle_z.is_finite(), "vehicle z must be finite, got {vehicle_z}");
        let mut recycled = 0;
        while vehicle_z > self.positions[self.first] + self.spacing / 2.0 {
            self.recycle_first();
            recycled += 1;
        }
        recycled
    }

    fn recycle_first(&mut self) {
        let wrapped = self.first;
        self.positions[wrapped] += SLOT_COUNT as f32 * self.spacing;
        self.first = (self.first + 1) % SLOT_COUNT;
        self.since_last_sign += 1;

        if self.sign_index == Some(wrapped) && self.since_last_sign as usize > SLOT_COUNT - 1 {
            log::debug!(
                "Sign {} retired from slot {} (now at z={})",
                self.signs_shown,
                wrapped,
                self.positions[wrapped]
            );
            self.sign_index = None;
            self.since_last_sign = 0;
            self.signs_shown += 1;
        }

        if self.since_last_sign == self.cadence && self.sign_index.is_none() {
            let slot = (SLOT_COUNT + self.first - 1) % SLOT_COUNT;
            log::debug!(
                "Sign {} ({:?}) placed on slot {} at z={}",
                self.signs_shown,
                SignVariant::for_count(self.signs_shown),
                slot,
                self.positions[slot]
            );
            self.sign_index = Some(slot);
            self.since_last_sign = 0;
        }
    }

    /// Placement of all four slots, in slot order
    pub fn query(&self) -> [SlotPlacement; SLOT_COUNT] {
        std::array::from_fn(|slot| self.placement(slot))
    }

    fn placement(&self, slot: usize) -> SlotPlacement {
        let z = self.positions[slot];
        let side = Side::of_slot(slot);
        let center = self.path.offset(z);
        let is_sign = self.sign_index == Some(slot);
        let straight_down = Vec3::new(0.0, -1.0, 0.0);

        let (x, light_direction, support) = if self.tunnels.is_inside_tunnel(z) {
            (center, straight_down, Support::Tunnel)
        } else if is_sign {
            (center, straight_down, Support::SignGantry)
        } else {
            match side {
                Side::Left => (center + self.path.half_width, Vec3::new(-1.0, -1.0, 0.0), Support::Pole),
                Side::Right => (center - self.path.half_width, Vec3::new(1.0, -1.0, 0.0), Support::Pole),
            }
        };

        SlotPlacement {
            slot,
            position: Vec3::new(x, LAMP_HEIGHT, z),
            light_direction,
            side,
            support,
            is_sign,
            sign: (support == Support::SignGantry).then(|| SignVariant::for_count(self.signs_shown)),
        }
    }

    /// Slot z positions, nearest-behind first
    pub fn ring_positions(&self) -> [f32; SLOT_COUNT] {
        std::array::from_fn(|i| self.positions[(self.first + i) % SLOT_COUNT])
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn sign_index(&self) -> Option<usize> {
        self.sign_index
    }

    pub fn signs_shown(&self) -> u32 {
        self.signs_shown
    }

    pub fn since_last_sign(&self) -> u32 {
        self.since_last_sign
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }
}

/// Corners of a sign panel spanning the road at `z`, top edge first
pub fn sign_panel(path: &PathCurve, z: f32) -> [Vec3; 4] {
    let left = path.left_border(z);
    let right = path.right_border(z);
    let top = LAMP_HEIGHT + SIGN_HEIGHT;
    let bottom = LAMP_HEIGHT - 0.1;
    [
        Vec3::new(left, top, z),
        Vec3::new(right, top, z),
        Vec3::new(right, bottom, z),
        Vec3::new(left, bottom, z),
    ]
}

//! Per-frame simulation tick
//!
//! Order matters: input, then border guidance, then the lamp ring. Rendering
//! reads the session only after the tick has returned.

use super::collision::BorderContact;
use super::state::{DrawMode, SessionState, Weather};
use super::vehicle::DriverCommand;

/// Host input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Driving commands, applied in order
    pub commands: Vec<DriverCommand>,
    pub toggle_collisions: bool,
    pub toggle_weather: bool,
    /// Random new wind direction for the rain
    pub change_wind: bool,
    pub cycle_camera: bool,
    pub toggle_hud: bool,
    pub toggle_draw_mode: bool,
    pub toggle_axes: bool,
    pub toggle_fog: bool,
    pub toggle_lighting: bool,
}

impl TickInput {
    pub fn driving(commands: &[DriverCommand]) -> Self {
        Self {
            commands: commands.to_vec(),
            ..Default::default()
        }
    }
}

/// What a tick did, for the host's logging and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub contact: BorderContact,
    /// Lamp slots recycled this tick
    pub lamps_recycled: u32,
    pub entered_tunnel: bool,
    pub left_tunnel: bool,
}

/// Advance the session by `elapsed` seconds
pub fn tick(state: &mut SessionState, input: &TickInput, elapsed: f32) -> TickReport {
    apply_toggles(state, input);

    for &command in &input.commands {
        state.vehicle.apply(command, &state.limits);
    }

    let step = state
        .guide
        .step_with_contact(&state.vehicle, elapsed, state.modes.collisions);
    state.vehicle = step.vehicle;

    let z = state.vehicle.position.z;
    let sign_before = state.roadside.sign_index();
    let lamps_recycled = state.roadside.advance(z);
    if let Some(slot) = state.roadside.sign_index().filter(|_| sign_before.is_none()) {
        log::info!("Sign ahead on slot {} (sign #{})", slot, state.roadside.signs_shown() + 1);
    }

    let in_tunnel = state.tunnels.is_inside_tunnel(z);
    let entered_tunnel = in_tunnel && !state.in_tunnel;
    let left_tunnel = !in_tunnel && state.in_tunnel;
    if entered_tunnel {
        log::info!("Entering tunnel at z={z:.1}");
    } else if left_tunnel {
        log::info!("Leaving tunnel at z={z:.1}");
    }
    state.in_tunnel = in_tunnel;

    state.ground.update(z, state.settings.render_distance);
    if state.modes.weather == Weather::Rainfall {
        state.rain.update(elapsed, z, &state.tunnels);
    }

    state.elapsed_secs += elapsed;
    state.time_ticks += 1;

    TickReport {
        contact: step.contact,
        lamps_recycled,
        entered_tunnel,
        left_tunnel,
    }
}

fn apply_toggles(state: &mut SessionState, input: &TickInput) {
    let modes = &mut state.modes;
    if input.toggle_collisions {
        modes.collisions = !modes.collisions;
        log::info!("Collisions: {}", modes.collisions);
    }
    if input.toggle_weather {
        modes.weather = match modes.weather {
            Weather::Clear => Weather::Rainfall,
            Weather::Rainfall => Weather::Clear,
        };
        log::info!("Weather: {:?}", modes.weather);
    }
    if input.toggle_hud {
        modes.hud = !modes.hud;
    }
    if input.toggle_draw_mode {
        modes.draw = match modes.draw {
            DrawMode::Solid => DrawMode::Wireframe,
            DrawMode::Wireframe => DrawMode::Solid,
        };
    }
    if input.toggle_axes {
        modes.axes = !modes.axes;
    }
    if input.toggle_fog {
        modes.fog = !modes.fog;
    }
    if input.toggle_lighting {
        modes.lighting = !modes.lighting;
    }
    if input.change_wind {
        state.rain.change_wind();
    }
    if input.cycle_camera {
        state.cycle_camera();
    }
}

//! Night Highway headless driver
//!
//! Runs a scripted ride through the scene at the fixed tick rate and logs what
//! a renderer would be asked to draw. Usage:
//!
//! `night-highway [settings.json] [seconds]`

use std::path::Path;

use night_highway::consts::TICK_RATE;
use night_highway::sim::{DriverCommand, SessionState, TickInput, tick};
use night_highway::{FpsCounter, HudReadout, Settings};

fn main() {
    env_logger::init();
    log::info!("Night Highway (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let mut state = SessionState::new(settings);
    let mut fps = FpsCounter::default();
    let dt = 1.0 / TICK_RATE as f32;

    for frame in 0..seconds * TICK_RATE {
        let mut input = TickInput::driving(&autopilot(&state));
        // Start raining ten seconds in
        input.toggle_weather = frame == 10 * TICK_RATE;

        let report = tick(&mut state, &input, dt);
        fps.frame(state.elapsed_secs);

        if report.lamps_recycled > 0 {
            let lamps = state.lamps();
            for lamp in lamps.iter().filter(|l| l.sign.is_some()) {
                log::debug!("Sign {:?} at z={:.1}", lamp.sign, lamp.position.z);
            }
        }

        if frame % TICK_RATE == 0 {
            let hud = HudReadout::capture(&state, &fps);
            let segments = state.segments();
            let tunnel_segments = state.segments().filter(|s| s.in_tunnel).count();
            let quads: u32 = state
                .segments()
                .map(|s| {
                    let (across, along) = state.tessellation(s.tier);
                    across * along
                })
                .sum();
            log::info!(
                "t={}s z={}m speed={:.1} segments={} (tunnel {}) quads={} contact={:?}",
                hud.elapsed_secs,
                hud.distance,
                hud.speed,
                segments.len(),
                tunnel_segments,
                quads,
                report.contact
            );
        }
    }

    println!(
        "Rode {:.0} units in {}s, {} signs passed",
        state.vehicle.position.z,
        seconds,
        state.roadside.signs_shown()
    );
}

/// Full throttle, steering toward the road centerline a few units ahead
fn autopilot(state: &SessionState) -> Vec<DriverCommand> {
    let vehicle = &state.vehicle;
    let look_ahead = vehicle.position.z + 10.0;
    let lateral = state.path.offset(look_ahead) - vehicle.position.x;
    let wanted = lateral.atan2(10.0).to_degrees();

    let mut commands = vec![DriverCommand::Accelerate];
    if vehicle.turn_angle < wanted - state.limits.angle_increment {
        commands.push(DriverCommand::TurnLeft);
    } else if vehicle.turn_angle > wanted + state.limits.angle_increment {
        commands.push(DriverCommand::TurnRight);
    }
    commands
}

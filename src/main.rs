//! Wild Tiger entry point
//!
//! Runs a headless scripted session against the null backend: the real
//! windowed host supplies its own `Gfx`/`InputSource` implementations and
//! drives `sim::tick` plus `render::draw` at the fixed tick rate. This
//! driver exists to exercise a whole session end to end from the command
//! line and log what happens.

use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use wild_tiger::assets::Assets;
use wild_tiger::consts::{FRAME_WIDTH, TICK_HZ};
use wild_tiger::platform::NullGfx;
use wild_tiger::render;
use wild_tiger::sim::{tick, Direction, GameEvent, GameState, Mode, TickInput};
use wild_tiger::{Config, Scorebook};

/// Safety stop for the scripted session
const MAX_TICKS: u64 = 60_000;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let matrix_size: Option<usize> = args.next().and_then(|a| a.parse().ok());
    let seed: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let mut config = Config::load();
    if let Some(size) = matrix_size {
        config.matrix_size = size;
    }
    if let Err(e) = config.validate() {
        log::error!("Bad configuration: {e}");
        return ExitCode::FAILURE;
    }

    let mut gfx = NullGfx::new();
    let assets = match Assets::load(&mut gfx) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Asset load failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut state = match GameState::new(seed, config, assets.catalog()) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Session setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Wild Tiger (headless) starting, seed {seed}");

    let tick_duration = Duration::from_secs(1) / TICK_HZ;
    let mut scorebook = Scorebook::new();
    let mut pointer = Vec2::new(0.0, 300.0);
    let mut stroke = 8.0;

    while !state.quit && state.mode != Mode::GameOver && state.time_ticks < MAX_TICKS {
        let frame_start = Instant::now();
        let input = scripted_input(&state, &mut pointer, &mut stroke);
        tick(&mut state, &input);
        render::draw(&state, &assets, &mut gfx);

        let events = state.drain_events();
        scorebook.observe(&events);
        for event in &events {
            if let GameEvent::Roar { tiger } = event {
                log::info!("Tiger {tiger} roars in the distance...");
            }
        }

        // Hold the fixed tick rate like a real frame driver would
        if let Some(remaining) = tick_duration.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    scorebook.save();
    log::info!(
        "Session over after {} ticks: {} of {} sessions purred, total score {:.0}",
        state.time_ticks,
        scorebook.successes(),
        scorebook.records.len(),
        state.total_score,
    );
    ExitCode::SUCCESS
}

/// A scripted stand-in for a human: dismisses screens, wanders in slowly
/// rotating directions, and pets at a steady middling stroke speed
fn scripted_input(state: &GameState, pointer: &mut Vec2, stroke: &mut f32) -> TickInput {
    match state.mode {
        Mode::Message | Mode::Help => TickInput {
            dismiss: true,
            ..Default::default()
        },
        Mode::Walking => {
            let leg = (state.time_ticks / 150) as usize;
            TickInput {
                direction: Some(Direction::ALL[leg % 4]),
                ..Default::default()
            }
        }
        Mode::Petting => {
            // Stroke back and forth at 8 px/tick; bouncing keeps every
            // sampled distance steady, with no phantom jump at the edges
            if pointer.x + *stroke <= 0.0 || pointer.x + *stroke >= FRAME_WIDTH {
                *stroke = -*stroke;
            }
            pointer.x += *stroke;
            TickInput {
                pointer: *pointer,
                pointer_down: true,
                ..Default::default()
            }
        }
        Mode::GameOver => TickInput::default(),
    }
}

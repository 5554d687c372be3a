//! Orbit Dodge entry point
//!
//! Loads settings, brings up the platform and renderer, and runs the game loop.
//! Exits with a failure code only if startup fails.

use std::process::ExitCode;

use orbit_dodge::platform::{HeadlessPlatform, HoldSegment, TimeSource};
use orbit_dodge::renderer::{DrawSink, GpuSink, RecordingSink, Renderer};
use orbit_dodge::settings::{Backend, Settings};
use orbit_dodge::{Game, InitError};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Orbit Dodge starting...");

    let settings = Settings::load();
    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Initialization failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<(), InitError> {
    let time = settings
        .fixed_step
        .map_or(TimeSource::Wall, TimeSource::Fixed);
    let mut platform =
        HeadlessPlatform::create_window(settings.width, settings.height, &settings.title, time)?;

    match settings.session_seconds {
        Some(seconds) => {
            platform = platform
                .with_script(HoldSegment::alternating(seconds, settings.autopilot_period))
                .close_after(seconds);
        }
        None => log::info!("No session length set; running until Escape or interrupt"),
    }

    let seed = settings.resolve_seed();
    match settings.backend {
        Backend::Gpu => {
            let sink = GpuSink::new(settings.width, settings.height)?;
            play(platform, sink, settings, seed)
        }
        Backend::Null => play(platform, RecordingSink::new(), settings, seed),
    }
}

fn play<S: DrawSink>(
    platform: HeadlessPlatform,
    sink: S,
    settings: &Settings,
    seed: u64,
) -> Result<(), InitError> {
    let renderer = Renderer::new(sink, settings.circle_edges(), settings.trails)?;
    let mut game = Game::new(platform, renderer, seed, settings.render_hz);
    game.run();
    Ok(())
}

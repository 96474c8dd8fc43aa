//! Headless demo of the cadence game engine: falling cubes.

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cadence_core::{config::Config, window::Size, GameLoop, GameWorld, Pass};

use crate::emitter::Emitter;

mod cube;
mod emitter;
mod logger;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");

/// Refresh interval of the simulated display, about 60 Hz.
const VSYNC: Duration = Duration::from_nanos(16_666_667);
const RUN_TIME: Duration = Duration::from_secs(10);
/// Count of frames between two presentations.
const PRESENT_EVERY: u64 = 60;
const WINDOW_SIZE: Size = Size::new(1280, 720);

/// Entry point of `cadence_rs` demo
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _handle = logger::init(level)?;
    log::info!("logger initialized successfully");

    let config = Config::new(APP_NAME.to_string(), APP_VERSION_STR.parse()?);
    log::info!(
        "running {} on {} {}",
        config.name(),
        cadence_core::config::ENGINE_NAME,
        *cadence_core::config::ENGINE_VERSION,
    );

    let mut emitter = Emitter::default();
    let mut rng = StdRng::from_entropy();
    let mut game = GameWorld::builder()
        .config(&config)
        .on_update(move |context| {
            if emitter.update(context.tick.delta_nanos()) {
                let width = context.window_size().width;
                cube::spawn(context.world, width, &mut rng)?;
            }
            Ok(())
        })
        .build()?;
    game.resize(WINDOW_SIZE)?;

    let game_loop = GameLoop::start(game, &config)?;
    let start = Instant::now();
    let mut frames = 0;
    while start.elapsed() < RUN_TIME {
        game_loop.frame(start.elapsed().as_nanos() as u64);
        frames += 1;
        if frames % PRESENT_EVERY == 0 {
            present(&game_loop);
        }
        thread::sleep(VSYNC);
    }

    game_loop.stop()?;
    log::info!("demo finished after {} frames", frames);
    Ok(())
}

/// Draws all cubes and reports what changed since the previous presentation.
fn present(game_loop: &GameLoop<GameWorld>) {
    let (drawn, changed, alive) = {
        let mut game = game_loop.game();
        let drawn = game.draw();
        let changed = game.world_mut().drain_changed().len();
        (drawn, changed, game.world().entity_count())
    };

    let performance = game_loop.performance();
    let rate = |pass| performance.rate(pass).unwrap_or_default();
    log::info!(
        "{} entities alive, {} drawn, {} changed; physics {:.1} ticks/s, update {:.1} ticks/s",
        alive,
        drawn,
        changed,
        rate(Pass::Physics),
        rate(Pass::Update),
    );
}

/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{GameConfig, LogConfig};
use sim::clock::FrameClock;
use sim::event::GameEvent;
use sim::input_queue::InputQueue;
use sim::level::load_level;
use sim::step;
use sim::world::WorldState;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::terminal::TerminalPresenter;

fn main() -> Result<()> {
    let config = GameConfig::load();
    let _log_guard = init_logging(&config.log);

    for w in &config.warnings {
        warn!("{w}");
    }

    // Bad levels fail here, before the terminal is touched.
    let level = load_level(&config).context("failed to load level")?;
    let mut world = WorldState::new(level);

    let mut presenter = TerminalPresenter::new(Renderer::new(config.tile_size));
    if let Err(e) = presenter.init() {
        let _ = presenter.cleanup();
        return Err(e).context("terminal init failed");
    }

    let result = game_loop(&mut world, &mut presenter, &config);

    if let Err(e) = presenter.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    info!(ticks = world.tick, "exiting");
    result
}

/// Log to a file: the terminal is in raw alternate-screen mode while
/// the game runs. `RUST_LOG` overrides the configured level.
///
/// A log file that cannot be opened does not stop the game; logs are
/// discarded and the reason goes to stderr before the screen switches.
fn init_logging(cfg: &LogConfig) -> WorkerGuard {
    let writer: Box<dyn Write + Send> = match open_log_file(cfg) {
        Ok(file) => Box::new(file),
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {e}", cfg.dir.join(&cfg.file).display());
            Box::new(io::sink())
        }
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(writer);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!(log_path = %cfg.dir.join(&cfg.file).display(), "stonekeep starting");
    guard
}

fn open_log_file(cfg: &LogConfig) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(cfg.file.as_str())
        .build(&cfg.dir)
}

fn game_loop(
    world: &mut WorldState,
    presenter: &mut TerminalPresenter,
    config: &GameConfig,
) -> Result<()> {
    let clock = FrameClock::new(config.fps);
    let mut kb = InputState::new();
    let mut gp = GamepadState::new(&config.gamepad);
    let mut queue = InputQueue::new();

    info!(
        fps = config.fps,
        interval_ms = clock.interval().as_secs_f64() * 1000.0,
        gamepad = gp.connected,
        "game loop started"
    );

    loop {
        let frame_start = Instant::now();

        let mut meta = kb.drain_events(&mut queue)?;
        meta.merge(gp.update(&mut queue));

        if meta.quit {
            info!(tick = world.tick, "quit requested");
            break;
        }
        if meta.restart {
            queue.clear();
            world.restart();
            info!(level = %world.level.name, "level restarted");
        }

        let pending = queue.len();
        let events = step::step(world, &mut queue);
        log_events(world.tick, pending, &events);

        presenter.render(world)?;

        let delay = clock.delay_since(frame_start);
        if delay.is_zero() {
            trace!(tick = world.tick, elapsed = ?frame_start.elapsed(), "frame overran interval");
        }
        std::thread::sleep(delay);
    }

    Ok(())
}

fn log_events(tick: u64, pending: usize, events: &[GameEvent]) {
    if pending > 1 {
        debug!(tick, pending, "multiple inputs this tick, newest first");
    }
    for event in events {
        match event {
            GameEvent::LocksOpened { lock, count } => {
                info!(tick, ?lock, count, "locks opened");
            }
            GameEvent::MoveBlocked { dir } => {
                trace!(tick, ?dir, "move blocked");
            }
            other => debug!(tick, event = ?other),
        }
    }
}

//! Panel arcade entrypoint: fixed 16 ms tick loop.
//!
//! Single-threaded by design. The framebuffer and session state are touched
//! only here; input devices and render sinks clean themselves up on drop, so
//! the error path out of the loop restores the terminal and releases grabs.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use panel_arcade::audio::Audio;
use panel_arcade::config::{Config, SinkChoice, USAGE};
use panel_arcade::core::SessionState;
use panel_arcade::display::{DeviceSink, FrameBuffer, RenderSink, SinkSet, TerminalSink};
use panel_arcade::input::InputSource;
use panel_arcade::score::HighScoreStore;
use panel_arcade::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, IDLE_SLEEP_MS, TICK_MS};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::from_env()?;
    if cfg.help {
        print!("{USAGE}");
        return Ok(());
    }
    run(&cfg)
}

fn build_sinks(cfg: &Config) -> Result<SinkSet> {
    let mut sinks: Vec<Box<dyn RenderSink>> = Vec::new();
    if cfg.wants_device() {
        sinks.push(Box::new(DeviceSink::new(&cfg.device_path)));
    }
    if cfg.wants_terminal() {
        sinks.push(Box::new(TerminalSink::new()?));
    }
    if sinks.is_empty() {
        bail!("no render sink configured");
    }
    Ok(SinkSet::new(sinks))
}

fn run(cfg: &Config) -> Result<()> {
    let audio = if cfg.sound_enabled {
        Audio::new(true, panel_arcade::audio::DEFAULT_EFFECT_DIR)
    } else {
        Audio::disabled()
    };
    let store = match &cfg.highscore_path {
        Some(path) => HighScoreStore::at(path.clone()),
        None => HighScoreStore::new(),
    };

    let mut sinks = build_sinks(cfg)?;
    let mut source = InputSource::new(cfg.sink == SinkChoice::Terminal)?;
    info!(controllers = source.controller_count(), "input ready");

    let mut session = match cfg.seed {
        Some(seed) => SessionState::with_seed(
            DEFAULT_WIDTH as i32,
            DEFAULT_HEIGHT as i32,
            cfg.duck_enabled,
            audio,
            store,
            seed,
        ),
        None => SessionState::new(
            DEFAULT_WIDTH as i32,
            DEFAULT_HEIGHT as i32,
            cfg.duck_enabled,
            audio,
            store,
        ),
    };

    let mut fb = FrameBuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let tick = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        if last_tick.elapsed() < tick {
            thread::sleep(Duration::from_millis(IDLE_SLEEP_MS));
            continue;
        }
        last_tick = Instant::now();

        let input = source.poll();
        if input.quit {
            info!(high_score = session.high_score, "quit requested");
            break;
        }

        session.update(&input);
        session.render(&mut fb);
        sinks.flush(&fb)?;
    }

    source.shutdown();
    Ok(())
}

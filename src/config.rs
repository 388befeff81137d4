//! Command-line configuration.

use std::path::PathBuf;

use anyhow::{bail, Result};

pub const DEFAULT_DEVICE_PATH: &str = "/dev/fb0";

pub const USAGE: &str = "\
panel-arcade: LED panel arcade games

USAGE:
    panel-arcade [OPTIONS]

OPTIONS:
    --terminal          render to the terminal instead of the panel device
    --both              render to the panel device and the terminal
    --device PATH       panel device path (default /dev/fb0)
    --highscore PATH    high-score file path override
    --no-duck           disable ducking (birds stay jumpable)
    --no-sound          disable all sound effects and speech
    --seed N            seed the session RNG (deterministic runs)
    --help              print this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkChoice {
    Device,
    Terminal,
    Both,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sink: SinkChoice,
    pub device_path: PathBuf,
    pub highscore_path: Option<PathBuf>,
    pub duck_enabled: bool,
    pub sound_enabled: bool,
    pub seed: Option<u64>,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sink: SinkChoice::Device,
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            highscore_path: None,
            duck_enabled: true,
            sound_enabled: true,
            seed: None,
            help: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cfg = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--terminal" => cfg.sink = SinkChoice::Terminal,
                "--both" => cfg.sink = SinkChoice::Both,
                "--device" => match args.next() {
                    Some(path) => cfg.device_path = PathBuf::from(path),
                    None => bail!("--device requires a path"),
                },
                "--highscore" => match args.next() {
                    Some(path) => cfg.highscore_path = Some(PathBuf::from(path)),
                    None => bail!("--highscore requires a path"),
                },
                "--no-duck" => cfg.duck_enabled = false,
                "--no-sound" => cfg.sound_enabled = false,
                "--seed" => match args.next() {
                    Some(n) => cfg.seed = Some(n.parse()?),
                    None => bail!("--seed requires a number"),
                },
                "--help" | "-h" => cfg.help = true,
                other => bail!("unknown option {other:?} (try --help)"),
            }
        }
        Ok(cfg)
    }

    /// Terminal rendering requested, either alone or alongside the device.
    pub fn wants_terminal(&self) -> bool {
        matches!(self.sink, SinkChoice::Terminal | SinkChoice::Both)
    }

    pub fn wants_device(&self) -> bool {
        matches!(self.sink, SinkChoice::Device | SinkChoice::Both)
    }
}

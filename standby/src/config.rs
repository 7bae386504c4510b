use crate::clock::{local_hours, parse_hh_mm, TimeSource};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

/// Full-screen sky clock for the terminal.
#[derive(Parser, Debug)]
#[command(name = "standby", version)]
pub(crate) struct Args {
    /// frame rate cap (clamped to 10..=240)
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// blend minutes into the sky gradient instead of stepping each hour
    #[arg(long)]
    smooth_sky: bool,

    /// show a fixed time instead of the wall clock, e.g. 18:30
    #[arg(long, value_name = "HH:MM", value_parser = parse_hh_mm)]
    at: Option<(u32, u32)>,

    /// run the clock at this many hours per second (starts from --at or now)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_speed)]
    speed: Option<f32>,

    /// monochrome braille output
    #[arg(long)]
    no_color: bool,

    /// don't draw the HH:MM readout
    #[arg(long)]
    hide_clock: bool,

    /// write logs here (the screen belongs to the display)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_speed(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("bad speed {s:?}"))?;
    if !v.is_finite() {
        return Err(format!("speed must be finite, got {s:?}"));
    }
    Ok(v)
}

#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) smooth_sky: bool,
    pub(crate) enable_color: bool,
    pub(crate) show_clock: bool,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) time: TimeSource,
}

impl Settings {
    pub(crate) fn from_args(args: Args, now: Instant) -> Self {
        let time = match (args.at, args.speed) {
            (at, Some(speed)) => TimeSource::Accelerated {
                started: now,
                origin_hours: at
                    .map(|(h, m)| h as f32 + m as f32 / 60.0)
                    .unwrap_or_else(local_hours),
                speed,
            },
            (Some((hour, minute)), None) => TimeSource::Fixed { hour, minute },
            (None, None) => TimeSource::System,
        };
        Self {
            fps_cap: args.fps.clamp(10, 240),
            smooth_sky: args.smooth_sky,
            enable_color: !args.no_color,
            show_clock: !args.hide_clock,
            log_file: args.log_file,
            time,
        }
    }
}

pub(crate) fn init_logging(settings: &Settings) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &settings.log_file {
        let file = File::create(path)
            .with_context(|| format!("could not open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("logger already initialised")?;
    Ok(())
}

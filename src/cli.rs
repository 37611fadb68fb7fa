#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::Condition;

pub const DEFAULT_FPS: u8 = 30;
pub const DEFAULT_SCALE: u8 = 8;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-backdrop",
    version,
    about = "Animated full-screen weather backdrop"
)]
pub struct Cli {
    /// Weather condition (clear, clouds, rain, drizzle, snow, thunderstorm)
    pub condition: Option<String>,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Logical pixels per terminal pixel (1..32)
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub scale: u8,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Seed for particle and cloud placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Advance to the next condition every N seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub cycle: Option<u64>,

    /// Show the active condition in the top-right corner
    #[arg(long)]
    pub label: bool,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Do not read or write the settings file
    #[arg(long)]
    pub no_save: bool,
}

impl Cli {
    /// Condition to start with. Clear when none is given.
    #[must_use]
    pub fn initial_condition(&self) -> Condition {
        Condition::parse(self.condition.as_deref())
    }

    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }
}

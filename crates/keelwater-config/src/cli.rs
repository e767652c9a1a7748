//! Command-line argument parsing for Keelwater.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Frames the demo renders when `--frames` is not given.
pub const DEFAULT_FRAMES: u32 = 3;

/// Keelwater command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "keelwater", about = "Underwater ship overlay")]
pub struct CliArgs {
    /// Enable or disable the overlay.
    #[arg(long)]
    pub enabled: Option<bool>,

    /// Maximum number of ships processed per frame.
    #[arg(long)]
    pub max_ships: Option<usize>,

    /// Overlay vertex alpha (0.0 - 1.0).
    #[arg(long)]
    pub alpha: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Number of frames the demo renders before exiting.
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    pub frames: u32,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            enabled: None,
            max_ships: None,
            alpha: None,
            log_level: None,
            frames: DEFAULT_FRAMES,
            config: None,
        }
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(enabled) = args.enabled {
            self.overlay.enabled = enabled;
        }
        if let Some(max) = args.max_ships {
            self.overlay.max_ships = max;
        }
        if let Some(alpha) = args.alpha {
            self.overlay.overlay_alpha = alpha.clamp(0.0, 1.0);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

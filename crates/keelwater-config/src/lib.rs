//! Configuration for Keelwater.
//!
//! Runtime settings for the underwater overlay persist to disk as a RON file.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization (missing fields fall back to defaults, unknown
//! fields are ignored).

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, DEFAULT_FRAMES};
pub use config::{Config, DebugConfig, OverlayConfig};
pub use error::ConfigError;

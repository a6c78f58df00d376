//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "dynacard", version, about = "Surface dynamometer card analyzer")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/dynacard.toml")]
    pub config: PathBuf,

    /// Output as JSON instead of pretty text (results and errors)
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one surface card CSV
    Analyze {
        /// Surface card CSV with strict 'Displacement,Rod Load' headers
        #[arg(long, value_name = "FILE")]
        card: PathBuf,
        /// Override smoothing window in samples (odd; takes precedence over config)
        #[arg(long, value_name = "SAMPLES")]
        window: Option<usize>,
        /// Override polynomial order of the local fit (takes precedence over config)
        #[arg(long, value_name = "ORDER")]
        polynomial_order: Option<usize>,
        /// Override stroke rate in strokes per minute (takes precedence over config)
        #[arg(long, value_name = "SPM")]
        spm: Option<u32>,
        /// Ignore config and overrides; analyze with stock parameters
        #[arg(long, action = ArgAction::SetTrue)]
        defaults: bool,
    },
    /// Quick health check (config parses, analysis numerics sane)
    SelfCheck,
}

//! Binary entrypoint: config loading, tracing setup, and dispatch.

mod analyze;
mod cli;
mod error_fmt;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::{Result, WrapErr};
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Cli::parse();
    let _ = JSON_MODE.set(args.json);

    if let Err(err) = run(&args) {
        if *JSON_MODE.get().unwrap_or(&false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(error_fmt::exit_code_for_error(&err));
    }
}

fn run(args: &Cli) -> Result<()> {
    color_eyre::install()?;

    let cfg = load_config(&args.config)?;
    cfg.validate()?;
    init_tracing(args, &cfg.logging)?;

    match &args.cmd {
        Commands::Analyze {
            card,
            window,
            polynomial_order,
            spm,
            defaults,
        } => analyze::run_analyze(
            &cfg,
            &analyze::AnalyzeArgs {
                card,
                window: *window,
                polynomial_order: *polynomial_order,
                spm: *spm,
                defaults: *defaults,
            },
            args.json,
        ),
        Commands::SelfCheck => analyze::run_self_check(&cfg, args.json),
    }
}

// A missing config file falls back to stock defaults; a present but broken
// one is an error.
fn load_config(path: &Path) -> Result<dynacard_config::Config> {
    if !path.exists() {
        return Ok(dynacard_config::Config::default());
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config file {}", path.display()))?;
    dynacard_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config file {}", path.display()))
}

fn init_tracing(args: &Cli, logging: &dynacard_config::Logging) -> Result<()> {
    let level = logging
        .level
        .clone()
        .unwrap_or_else(|| args.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Optional JSON-lines file sink, rotation per config
    let file_layer = match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .map_or_else(|| "dynacard.log".into(), std::ffi::OsStr::to_os_string);
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if args.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
    .map_err(|e| eyre::eyre!("initialize tracing: {e}"))
}

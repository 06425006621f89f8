//! `labtl` command line entry point.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use labtl_cli::commands::{run_layout, run_panels, run_render};
use labtl_cli::config::{TimelineConfig, load_config};
use labtl_cli::logging::{LogConfig, LogFormat, init_logging};
use labtl_layout::LayoutOutcome;
use labtl_render::render_outline;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LayoutArgs, LogFormatArg, LogLevelArg, PanelsArgs, RenderArgs};
use crate::summary::{print_layout_summary, print_panels};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Layout(args) => layout(args, &config),
        Command::Render(args) => render(args, &config),
        Command::Panels(args) => panels(args, &config),
    }
}

fn layout(args: &LayoutArgs, config: &TimelineConfig) -> Result<()> {
    let outcome = run_layout(&args.snapshot, config)?;
    match (&outcome, args.json) {
        (LayoutOutcome::Ready(layout), true) => {
            let json = serde_json::to_string_pretty(layout).context("serialize layout")?;
            println!("{json}");
        }
        (LayoutOutcome::Ready(layout), false) => print_layout_summary(layout),
        (LayoutOutcome::Empty, true) => println!("{}", serde_json::json!({ "status": "empty" })),
        (LayoutOutcome::NotLoaded, true) => {
            println!("{}", serde_json::json!({ "status": "not_loaded" }));
        }
        (LayoutOutcome::Empty, false) => println!("No data to display"),
        (LayoutOutcome::NotLoaded, false) => println!("Timeline data not loaded"),
    }
    Ok(())
}

fn render(args: &RenderArgs, config: &TimelineConfig) -> Result<()> {
    match run_render(&args.snapshot, config, args.offset, args.patient.as_deref())? {
        Some(view) => println!("{}", render_outline(&view)),
        None => println!("Timeline data not loaded"),
    }
    Ok(())
}

fn panels(args: &PanelsArgs, config: &TimelineConfig) -> Result<()> {
    let report = run_panels(&args.snapshot, config)?;
    print_panels(&report);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

//! Argument definitions for `labtl`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "labtl",
    version,
    about = "Grouped lab-result timeline - lay out and render panel grids",
    long_about = "Lay out lab results on a shared time axis, grouped by panel.\n\n\
                  Reads a filter context snapshot (JSON) holding the test rows,\n\
                  the panel hierarchy and the checkbox selection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow observation values in trace logs.
    ///
    /// Values are patient data and are redacted unless this is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the time axis and panel groups of a snapshot.
    Layout(LayoutArgs),

    /// Print a text outline of the rendered timeline.
    Render(RenderArgs),

    /// List the panel hierarchy with checkbox state.
    Panels(PanelsArgs),
}

#[derive(Parser)]
pub struct LayoutArgs {
    /// Filter context snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Print the computed layout as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Filter context snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Horizontal scroll offset in pixels.
    #[arg(long = "offset", default_value_t = 0)]
    pub offset: u32,

    /// Patient UUID used in trendline links.
    #[arg(long = "patient", value_name = "UUID")]
    pub patient: Option<String>,
}

#[derive(Parser)]
pub struct PanelsArgs {
    /// Filter context snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! CLI argument definitions for the atlas boundary toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "Atlas boundary toolkit - clean, simplify, and render admin-0 boundaries",
    long_about = "Clean an admin-0 boundary snapshot, derive topology-preserving\n\
                  simplification tiers as TopoJSON, and render choropleth SVG maps\n\
                  from index scores."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a boundary snapshot and merge the disputed territories.
    Clean(CleanArgs),

    /// Build the shared-arc topology and derive simplification tiers.
    Simplify(SimplifyArgs),

    /// Render a choropleth SVG from boundaries and index scores.
    Render(RenderArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the admin-0 boundaries GeoJSON file.
    #[arg(value_name = "BOUNDARIES")]
    pub boundaries: PathBuf,

    /// Path to the disputed-territories GeoJSON file.
    #[arg(value_name = "DISPUTED")]
    pub disputed: PathBuf,

    /// Output directory for generated files (default: <BOUNDARIES dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Select split parts by exploded position instead of content.
    ///
    /// Compatibility mode: positional selection is only valid while the
    /// upstream part ordering is stable.
    #[arg(long = "positional-parts")]
    pub positional_parts: bool,
}

#[derive(Parser)]
pub struct SimplifyArgs {
    /// Path to the cleaned boundaries GeoJSON file.
    #[arg(value_name = "BOUNDARIES")]
    pub input: PathBuf,

    /// Output directory for generated files (default: <BOUNDARIES dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Tiers to derive; repeatable (default: all tiers).
    #[arg(long = "tier", value_enum, value_name = "TIER")]
    pub tiers: Vec<TierArg>,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Path to the cleaned boundaries GeoJSON file.
    #[arg(value_name = "BOUNDARIES")]
    pub boundaries: PathBuf,

    /// Path to the index-score CSV file.
    #[arg(value_name = "SCORES")]
    pub scores: PathBuf,

    /// Indicator column to map.
    #[arg(long = "variable", value_name = "NAME")]
    pub variable: String,

    /// Year to display.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: i32,

    /// Output SVG path (default: choropleth_map.svg).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Limit the map to one named region.
    #[arg(long = "region", value_name = "NAME", conflicts_with = "bbox")]
    pub region: Option<String>,

    /// Limit the map to a lon/lat window: min_lon,min_lat,max_lon,max_lat.
    #[arg(long = "bbox", value_name = "BBOX")]
    pub bbox: Option<String>,

    /// Hex break colors; repeatable, 2 to 5 values (default palette otherwise).
    #[arg(long = "color", value_name = "HEX")]
    pub colors: Vec<String>,

    /// Canvas width in pixels.
    #[arg(long = "width", value_name = "PX", default_value_t = 2500.0)]
    pub width: f64,

    /// Canvas height in pixels.
    #[arg(long = "height", value_name = "PX", default_value_t = 1600.0)]
    pub height: f64,

    /// Territory border stroke width.
    #[arg(long = "border-width", value_name = "PX", default_value_t = 0.5)]
    pub border_width: f64,
}

/// CLI tier choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TierArg {
    #[value(name = "10m")]
    M10,
    #[value(name = "30m")]
    M30,
    #[value(name = "50m")]
    M50,
    #[value(name = "100m")]
    M100,
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

//! CLI argument definitions for feedpluck.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `annunciator` | Member shown on a Parliament annunciator line |
//! | `questions` | Written-question count for a member |
//! | `forecast` | Hourly NWS forecast as plottable rows |
//! | `pluck` | Extract a path from a local JSON document |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `3000` | Request timeout in ms |
//! | `--user-agent` | `feedpluck/<version>` | Identification sent upstream |
//! | `--offline` | unset | Serve responses from a fixture directory |
//!
//! # Examples
//!
//! ```bash
//! feedpluck annunciator --chamber lords --with-questions
//! feedpluck forecast --lat 39.7456 --lon -97.0892 --format table
//! curl -s https://api.weather.gov/points/39.7456,-97.0892 \
//!   | feedpluck pluck - properties.forecastHourly
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use feedpluck_core::config::DEFAULT_USER_AGENT;
use feedpluck_core::http_client::DEFAULT_TIMEOUT_MS;

/// Pull values out of public JSON APIs.
#[derive(Debug, Parser)]
#[command(
    name = "feedpluck",
    author,
    version,
    about = "Query Parliament annunciator and NWS forecast APIs with safe JSON extraction"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// User-Agent header; api.weather.gov asks for contact details here.
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Directory with a routes.json (URL -> file) manifest to answer requests
    /// from instead of the network.
    #[arg(long, global = true, value_name = "FIXTURE_DIR")]
    pub offline: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminal display.
    Table,
    /// Single JSON document.
    Json,
    /// One JSON value per line; arrays are split into their elements.
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the member on an annunciator line.
    Annunciator(AnnunciatorArgs),
    /// Count a member's written questions.
    Questions(QuestionsArgs),
    /// Fetch the hourly forecast for a location.
    Forecast(ForecastArgs),
    /// Extract a path from a JSON file ("-" for stdin).
    Pluck(PluckArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Chamber {
    Commons,
    Lords,
}

#[derive(Debug, Args)]
pub struct AnnunciatorArgs {
    #[arg(long, value_enum, default_value_t = Chamber::Lords)]
    pub chamber: Chamber,

    /// `current` or an ISO-8601 timestamp such as 2025-05-20T15:00:00Z; no offset means UTC.
    #[arg(long, default_value = "current")]
    pub date: String,

    #[arg(long, default_value_t = 0)]
    pub slide: usize,

    #[arg(long, default_value_t = 1)]
    pub line: usize,

    /// Also look up the member's written-question count.
    #[arg(long, default_value_t = false)]
    pub with_questions: bool,
}

#[derive(Debug, Args)]
pub struct QuestionsArgs {
    pub member_id: u64,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Drop unreadable periods (reported as warnings) instead of failing.
    #[arg(long, default_value_t = false)]
    pub skip_bad_rows: bool,
}

#[derive(Debug, Args)]
pub struct PluckArgs {
    /// JSON file to read, or "-" for stdin.
    pub input: PathBuf,

    /// Dotted path such as slides[0].lines[1].member.id.
    pub path: String,

    /// JSON value returned when the path is unreachable.
    #[arg(long, default_value = "null", allow_negative_numbers = true)]
    pub default: String,
}

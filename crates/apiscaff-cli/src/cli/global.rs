//! Flags shared by `create`, `resolve` and `extract`.
//!
//! Logging goes to stderr at the level picked here; command results go to
//! stdout in the chosen [`OutputFormat`].

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level: none shows warnings, `-v` shows resolution and run
    /// progress, `-vv` adds engine stderr and per-file decisions, `-vvv`
    /// traces everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Log level on stderr:
    (none)  - warnings: skipped specs, missing domain, cached archives
    -v      - info: resolved archives, written artifacts
    -vv     - debug: matched files, engine stderr
    -vvv    - trace"
    )]
    pub verbose: u8,

    /// Only errors on stderr. Human and plain summaries are dropped; JSON is still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only report errors"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// apiscaff settings (engine, output paths, accessory defaults).
    /// Repository remotes live in a separate `repository.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "APISCAFF_CONFIG",
        help = "apiscaff config file (TOML)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How run summaries and resolved references are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Colored summary lines.
    Human,
    /// Uncolored summary lines.
    Plain,
    /// One JSON document per command; logs switch to JSON lines on stderr.
    Json,
}

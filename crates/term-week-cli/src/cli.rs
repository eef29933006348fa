use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Academic term and week calendar tool.
#[derive(Parser)]
#[command(
    name = "termweek",
    version,
    about = "Compile academic term calendars and look up term weeks"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pin "now" to an RFC 3339 instant; its offset becomes the local offset.
    #[arg(long, global = true, value_name = "DATETIME")]
    pub now: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compile a term configuration into a term table.
    Compile(CompileArgs),
    /// Show a term.
    Term(TermArgs),
    /// Show a single week.
    Week(WeekArgs),
    /// List a range of weeks within a term.
    Weeks(WeeksArgs),
    /// List a range of terms.
    Terms(TermsArgs),
}

/// Arguments for the `compile` subcommand.
#[derive(clap::Args)]
pub struct CompileArgs {
    /// Path to TOML term configuration.
    #[arg(short, long, default_value = "term.toml")]
    pub config: PathBuf,

    /// Path for the compiled JSON table.
    #[arg(short, long, default_value = "termData.json")]
    pub output: PathBuf,
}

/// Options shared by every query subcommand.
#[derive(clap::Args)]
pub struct TableArgs {
    /// Path to a compiled term table.
    #[arg(short, long, default_value = "termData.json")]
    pub table: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `term` subcommand.
#[derive(clap::Args)]
pub struct TermArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Term code (`2061` or `20061`); defaults to the current term.
    #[arg(short, long, conflicts_with = "date")]
    pub strm: Option<String>,

    /// Term containing this date (`yyyy-mm-dd` or RFC 3339).
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for the `week` subcommand.
#[derive(clap::Args)]
pub struct WeekArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Term code; defaults to the term containing `--date`, or the current term.
    #[arg(short, long)]
    pub strm: Option<String>,

    /// Week code (`w3`, `b1`, `p2`) or week epoch.
    #[arg(short, long, conflicts_with = "date")]
    pub week: Option<String>,

    /// Week containing this date (`yyyy-mm-dd` or RFC 3339).
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for the `weeks` subcommand.
#[derive(clap::Args)]
pub struct WeeksArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Term code; defaults to the current term.
    #[arg(short, long)]
    pub strm: Option<String>,

    /// First week (code or epoch); defaults to the current week.
    #[arg(long)]
    pub from: Option<String>,

    /// Last week (code or epoch); defaults to the current week.
    #[arg(long)]
    pub to: Option<String>,

    /// List every week of the term, ignoring `--from`/`--to`.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all: bool,
}

/// Arguments for the `terms` subcommand.
#[derive(clap::Args)]
pub struct TermsArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// First term code; defaults to the current term.
    #[arg(long)]
    pub from: Option<String>,

    /// Last term code; defaults to the current term.
    #[arg(long)]
    pub to: Option<String>,
}

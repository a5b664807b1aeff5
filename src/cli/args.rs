//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::enhance::AbsentBid;
use crate::utils::date::DateLocale;

/// Enhance and query semantic documents
#[derive(Parser, Debug, Clone)]
#[command(name = "semdoc", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path [default: semdoc.toml, searched upward]
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Enhance a document and write the resulting HTML
    #[command(visible_alias = "e")]
    Enhance {
        #[command(flatten)]
        input: InputArgs,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        #[command(flatten)]
        enhance: EnhanceArgs,
    },

    /// Print JSON summaries of elements in an enhanced document
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        input: InputArgs,

        /// What to look up
        #[arg(value_enum)]
        target: QueryTarget,

        /// Bid for `bid`, selector for `select`
        value: Option<String>,

        #[command(flatten)]
        enhance: EnhanceArgs,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Navigate to a bid and print the resulting timeline as JSON
    #[command(visible_alias = "n")]
    Navigate {
        #[command(flatten)]
        input: InputArgs,

        /// Bid of the element to navigate to
        bid: String,

        #[command(flatten)]
        enhance: EnhanceArgs,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Document source.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// HTML file to read, or `-` for stdin
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,
}

impl InputArgs {
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

/// Enhancement overrides shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EnhanceArgs {
    /// Locale for suggestion dates (en-US, en-GB, de-DE, fr-FR, ja-JP, iso)
    #[arg(short, long)]
    pub locale: Option<DateLocale>,

    /// What to write for comment boundaries without a bid
    #[arg(long, value_name = "omit|null")]
    pub absent_bid: Option<AbsentBid>,

    /// Highlight duration in milliseconds
    #[arg(long, value_name = "MS")]
    pub highlight_ms: Option<u64>,
}

/// Lookups offered by `semdoc query`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget {
    /// The first element with the given bid
    Bid,
    /// Every footnote body
    Footnotes,
    /// Suggested deletions and insertions
    Changes,
    /// Comment boundary markers
    Comments,
    /// Elements matching a CSS selector
    Select,
}

//! CLI argument definitions for the Dobble deck client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dobble_model::{ExportSettings, GenerationMode, Notation};

#[derive(Parser)]
#[command(
    name = "dobble",
    version,
    about = "Dobble deck client - validate, generate and export spot-it card decks",
    long_about = "Validate deck parameters, generate decks and export printable PDFs\n\
                  through a Dobble deck service.\n\n\
                  The service origin is taken from --base-url, then the\n\
                  DOBBLE_API_BASE environment variable, then http://localhost:8000."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Deck service origin.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Base URL that relative image references are resolved against.
    #[arg(long = "asset-base", value_name = "URL", global = true)]
    pub asset_base: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check deck parameters with the service and print the derived sizes.
    Validate(DeckArgs),

    /// Validate, then generate a deck and print it.
    Generate(GenerateArgs),

    /// Validate, generate and export the deck as a printable PDF.
    Export(ExportArgs),
}

/// Deck parameters shared by every subcommand.
#[derive(Args, Clone)]
pub struct DeckArgs {
    /// What --how-many means.
    #[arg(long = "mode", value_enum, default_value = "order")]
    pub mode: ModeArg,

    /// The number entered for the chosen mode.
    #[arg(long = "how-many", value_name = "N")]
    pub how_many: Option<i64>,

    /// How symbols are drawn on the cards.
    #[arg(long = "notation", value_enum, default_value = "numbers")]
    pub notation: NotationArg,

    /// Image reference (data URL, http(s) URL or file path). Repeat once per
    /// symbol when --notation images is used.
    #[arg(long = "symbol", value_name = "REF")]
    pub symbols: Vec<String>,
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub deck: DeckArgs,

    /// Print the deck as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub deck: DeckArgs,

    /// Where to write the PDF.
    #[arg(
        long = "output",
        short = 'o',
        value_name = "PATH",
        default_value = dobble_client::DEFAULT_PDF_FILE_NAME
    )]
    pub output: PathBuf,

    /// Fixed layout seed, for reproducible placement.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Cards placed on each page.
    #[arg(long = "cards-per-page", value_name = "COUNT")]
    pub cards_per_page: Option<u32>,

    /// Card diameter in millimetres.
    #[arg(long = "card-diameter-mm", value_name = "MM")]
    pub card_diameter_mm: Option<f64>,

    /// Skip cut marks around cards.
    #[arg(long = "no-cut-marks")]
    pub no_cut_marks: bool,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl ExportArgs {
    /// Layout settings with the command-line overrides applied.
    pub fn settings(&self) -> ExportSettings {
        let mut settings = ExportSettings::default();
        if self.seed.is_some() {
            settings.randomization.seed = self.seed;
        }
        if let Some(per_page) = self.cards_per_page {
            settings.card.per_page = per_page;
        }
        if let Some(diameter) = self.card_diameter_mm {
            settings.card.diameter_mm = diameter;
        }
        if self.no_cut_marks {
            settings.card.cut_marks = false;
        }
        settings
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// --how-many is the projective order n.
    Order,
    /// --how-many is the number of cards.
    Count,
    /// --how-many is the number of symbols on each card.
    SymbolsPerCard,
}

impl From<ModeArg> for GenerationMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Order => GenerationMode::ByOrder,
            ModeArg::Count => GenerationMode::ByCount,
            ModeArg::SymbolsPerCard => GenerationMode::BySymbolsPerCard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NotationArg {
    Numbers,
    Letters,
    Images,
}

impl From<NotationArg> for Notation {
    fn from(value: NotationArg) -> Self {
        match value {
            NotationArg::Numbers => Notation::Numeric,
            NotationArg::Letters => Notation::Alphabetic,
            NotationArg::Images => Notation::Images,
        }
    }
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

//! CLI argument definitions for the larder browser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use larder_core::{Approval, Choice, ExclusiveChoice, FilterAction, MultiDimension, StockStatus};
use larder_model::{DietTag, StorageType, VerificationStatus};

#[derive(Parser)]
#[command(
    name = "larder",
    version,
    about = "Browse inventory snapshots with faceted filters",
    long_about = "Browse an inventory snapshot (JSON or CSV) with faceted filters.\n\n\
                  Facet counts always cover the whole snapshot; the records table and\n\
                  the KPI summary cover the filtered records only."
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

    /// Config file (default: ./larder.toml if present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter a snapshot and print the matching records with KPIs.
    Browse(BrowseArgs),

    /// Print the facet options and counts of a snapshot.
    Facets(FacetsArgs),

    /// List the table columns and their default visibility.
    Columns,
}

#[derive(Args)]
pub struct BrowseArgs {
    /// Snapshot file (.json or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Hide a column for this run (repeatable).
    #[arg(long = "hide-column", value_name = "KEY")]
    pub hide_columns: Vec<String>,

    /// Show a column hidden by default (repeatable).
    #[arg(long = "show-column", value_name = "KEY")]
    pub show_columns: Vec<String>,

    /// Rows to print, 0 for all (overrides [display] max_rows).
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<usize>,
}

#[derive(Args)]
pub struct FacetsArgs {
    /// Snapshot file (.json or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Facet selections (repeatable, OR within a flag) and exclusive choices.
#[derive(Args, Default)]
pub struct FilterArgs {
    #[arg(long = "supplier", value_name = "NAME")]
    pub suppliers: Vec<String>,

    #[arg(long = "allergen", value_name = "NAME")]
    pub allergens: Vec<String>,

    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    #[arg(long = "subcategory", value_name = "NAME")]
    pub subcategories: Vec<String>,

    #[arg(long = "brand", value_name = "NAME")]
    pub brands: Vec<String>,

    /// Diet tag, e.g. vegan or gluten-free.
    #[arg(long = "diet", value_name = "TAG")]
    pub diet: Option<DietTag>,

    /// verified, partial or unverified.
    #[arg(long = "verification", value_name = "STATUS")]
    pub verification: Option<VerificationStatus>,

    /// approved or unapproved (yes/no also accepted).
    #[arg(long = "approved", value_name = "STATE")]
    pub approval: Option<Approval>,

    /// ambient, refrigerated or frozen.
    #[arg(long = "storage", value_name = "TYPE")]
    pub storage: Option<StorageType>,

    /// ok, low or negative.
    #[arg(long = "stock", value_name = "STATUS")]
    pub stock: Option<StockStatus>,
}

impl FilterArgs {
    /// Filter transitions equivalent to these flags, in a fixed order.
    pub fn actions(&self) -> Vec<FilterAction> {
        let selections = [
            (MultiDimension::Supplier, &self.suppliers),
            (MultiDimension::Allergen, &self.allergens),
            (MultiDimension::Category, &self.categories),
            (MultiDimension::Subcategory, &self.subcategories),
            (MultiDimension::Brand, &self.brands),
        ];
        let mut actions: Vec<FilterAction> = selections
            .into_iter()
            .flat_map(|(dimension, values)| {
                values
                    .iter()
                    .map(move |value| FilterAction::select(dimension, value.clone()))
            })
            .collect();

        let exclusive = [
            self.diet.map(|tag| ExclusiveChoice::Diet(Choice::Only(tag))),
            self.verification
                .map(|status| ExclusiveChoice::Verification(Choice::Only(status))),
            self.approval
                .map(|approval| ExclusiveChoice::Approval(Choice::Only(approval))),
            self.storage
                .map(|storage| ExclusiveChoice::Storage(Choice::Only(storage))),
            self.stock.map(|stock| ExclusiveChoice::Stock(Choice::Only(stock))),
        ];
        actions.extend(exclusive.into_iter().flatten().map(FilterAction::set_exclusive));
        actions
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

//! Clap derive structures for the `stockly` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stockly_core::{SortField, SortOrder};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockly -- inventory management from the command line
#[derive(Debug, Parser)]
#[command(
    name = "stockly",
    version,
    about = "Manage product inventory from the command line",
    long_about = "Browse, search, and edit the product catalog of a stockly\n\
        inventory service: paginated listings with filtering and sorting,\n\
        plus create/update/delete operations.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Inventory service base URL (overrides config)
    #[arg(long, short = 's', env = "STOCKLY_SERVER_URL", global = true)]
    pub server: Option<String>,

    /// Path to the config file
    #[arg(long, env = "STOCKLY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOCKLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STOCKLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Products per page
    #[arg(long, env = "STOCKLY_PAGE_SIZE", global = true)]
    pub page_size: Option<u32>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Sort argument enums ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Price,
    Quantity,
    CreatedAt,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortField::Name,
            SortArg::Price => SortField::Price,
            SortArg::Quantity => SortField::Quantity,
            SortArg::CreatedAt => SortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products (searchable, filterable, paginated)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a product
    #[command(alias = "add")]
    Create(DraftArgs),

    /// Update an existing product
    Update(UpdateArgs),

    /// Delete a product
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// List the distinct product categories
    Categories,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

// ── Per-command arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text search over product names
    #[arg(long)]
    pub search: Option<String>,

    /// Only show products in this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Sort key
    #[arg(long, default_value = "name")]
    pub sort: SortArg,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    pub order: OrderArg,

    /// Page to display
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Product name
    #[arg(long, value_parser = parse_nonempty)]
    pub name: String,

    /// Units in stock
    #[arg(long)]
    pub quantity: u32,

    /// Unit price
    #[arg(long, value_parser = parse_price)]
    pub price: f64,

    /// Category label
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Product id
    pub id: String,

    #[command(flatten)]
    pub draft: DraftArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Product id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

// ── Value parsers ────────────────────────────────────────────────────

fn parse_nonempty(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("must not be empty".into())
    } else {
        Ok(raw.to_owned())
    }
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw.parse().map_err(|e| format!("not a number: {e}"))?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err("must be zero or positive".into())
    }
}

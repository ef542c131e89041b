use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rowfill::cli;
use rowfill::config::{parse_column, FillConfig, Variant, DEFAULT_FALLBACK_TEXT};
use rowfill::fill::{FillColumns, DEFAULT_ADDRESS_COLUMN, DEFAULT_CITY_COLUMN};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rowfill")]
#[command(about = "Backfill blank city/address cells in an Excel workbook")]
#[command(long_about = "rowfill - backfill blank city/address cells in an Excel workbook

Reads the first worksheet of INPUT, fills blank city/address cells and
writes the whole workbook to OUTPUT. INPUT is never modified.

COMMANDS:
  cross-fill  - Fill a blank city from the address and vice versa
  fallback    - Fill a blank city (and address, if both blank) with fixed text
  run         - Run a job described by a YAML config file

EXAMPLES:
  rowfill cross-fill customers.xlsx step1.xlsx
  rowfill fallback step1.xlsx step2.xlsx --text Ramallah
  rowfill run --config job.yaml --dry-run")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Fill a blank city from the address and vice versa.

For every row of the first worksheet:
  city blank, address set   → city := address
  address blank, city set   → address := city
  otherwise                 → unchanged

Numbers are copied as text without a trailing fraction (5 → \"5\").
Formulas are copied as their source text.")]
    /// Fill a blank city from the address and vice versa
    CrossFill {
        #[command(flatten)]
        job: JobArgs,
    },

    #[command(long_about = "Fill a blank city with fixed text.

For every row of the first worksheet:
  city and address blank    → both := TEXT
  city blank, address set   → city := TEXT
  otherwise                 → unchanged

The address is never filled from the city.")]
    /// Fill a blank city (and address, if both are blank) with fixed text
    Fallback {
        #[command(flatten)]
        job: JobArgs,

        /// Text written into blank cells
        #[arg(short, long, env = "ROWFILL_FALLBACK_TEXT", default_value = DEFAULT_FALLBACK_TEXT)]
        text: String,
    },

    #[command(long_about = "Run a job described by a YAML config file.

CONFIG FORMAT:
  input: customers.xlsx
  output: customers_filled.xlsx
  variant: fallback        # or cross-fill
  fallback_text: Ramallah  # optional
  city_column: B           # optional, letter or zero-based index
  address_column: 5        # optional

Relative paths are resolved against the config file's directory.")]
    /// Run a job described by a YAML config file
    Run {
        /// Path to YAML config file
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct JobArgs {
    /// Path to Excel file (.xlsx)
    input: PathBuf,

    /// Output Excel file path (.xlsx), must differ from input
    output: PathBuf,

    /// City column, as a letter or zero-based index
    #[arg(long, value_parser = column_arg, default_value_t = DEFAULT_CITY_COLUMN)]
    city_column: u16,

    /// Address column, as a letter or zero-based index
    #[arg(long, value_parser = column_arg, default_value_t = DEFAULT_ADDRESS_COLUMN)]
    address_column: u16,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// Preview changes without writing the output file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show per-row decisions on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl JobArgs {
    fn into_config(self, variant: Variant) -> (FillConfig, RunArgs) {
        let config = FillConfig::new(self.input, self.output, variant).with_columns(FillColumns {
            city: self.city_column,
            address: self.address_column,
        });
        (config, self.run)
    }
}

fn column_arg(s: &str) -> Result<u16, String> {
    parse_column(s).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rowfill=debug" } else { "rowfill=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, run) = match cli.command {
        Commands::CrossFill { job } => job.into_config(Variant::CrossFill),
        Commands::Fallback { job, text } => {
            let (config, run) = job.into_config(Variant::Fallback);
            (config.with_fallback_text(text), run)
        }
        Commands::Run { config, run } => {
            init_tracing(run.verbose);
            let loaded = FillConfig::from_yaml_file(&config)
                .with_context(|| format!("Failed to load config {}", config.display()))?;
            return execute(&loaded, run.dry_run);
        }
    };

    init_tracing(run.verbose);
    execute(&config, run.dry_run)
}

fn execute(config: &FillConfig, dry_run: bool) -> anyhow::Result<()> {
    cli::fill(config, dry_run)
        .with_context(|| format!("Failed to process {}", config.input_path.display()))
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally::cli::{self, AnalyzeOptions, OutputFormat};
use tally::error::TallyResult;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "CSV column profiler: filter, sort, summarize, and plot from the terminal.")]
#[command(long_about = "Tally - CSV summary statistics without a spreadsheet

COMMANDS:
  analyze    - Filter/sort rows and compute per-column statistics
  columns    - List the header columns of a CSV file
  histogram  - Render terminal histograms for numeric columns
  watch      - Re-run the analysis whenever the file changes

EXAMPLES:
  tally analyze sales.csv --columns amount,qty
  tally analyze sales.csv --filter-column region --filter-value east \\
      --sort-column date --date-column date
  tally histogram sales.csv --columns amount --bins 20
  tally watch sales.csv --date-column date")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Compute summary statistics for the selected columns.

Rows are filtered first (exact string match, both --filter-column and
--filter-value required for the filter to apply), then stably sorted by
the --sort-column string value. A selected column counts as numeric when
its value in the FIRST surviving row parses as a number; rows that fail
to parse after that are skipped with a warning.

Per numeric column: count, average, minimum, maximum, median, mode
(or 'No mode' when the most frequent value is not unique), and sample
standard deviation. With --date-column, the oldest and newest YYYY-MM-DD
dates are reported; other date formats are rejected per row.

EXAMPLES:
  tally analyze sales.csv
  tally analyze sales.csv --columns amount --filter-column region --filter-value east
  tally analyze sales.csv --date-column date --format json")]
    /// Compute per-column summary statistics
    Analyze {
        /// Path to CSV file (first row is the header)
        file: PathBuf,

        /// Column to filter on (requires --filter-value)
        #[arg(long)]
        filter_column: Option<String>,

        /// Exact value rows must match in the filter column
        #[arg(long)]
        filter_value: Option<String>,

        /// Column to sort rows by (lexicographic string order)
        #[arg(long)]
        sort_column: Option<String>,

        /// Column holding YYYY-MM-DD dates for oldest/newest reporting
        #[arg(long)]
        date_column: Option<String>,

        /// Comma-separated columns to analyze (default: all columns)
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// List header columns with their positions
    Columns {
        /// Path to CSV file
        file: PathBuf,
    },

    #[command(long_about = "Render terminal histograms for numeric columns.

Histograms use the whole file (no filtering or sorting) and are strict
about input: a column qualifies only when every row's value parses as a
number. Bins are equal-width over [min, max]; the last bin is
right-inclusive.

EXAMPLES:
  tally histogram sales.csv
  tally histogram sales.csv --columns amount,qty --bins 20")]
    /// Render terminal histograms for numeric columns
    Histogram {
        /// Path to CSV file
        file: PathBuf,

        /// Comma-separated columns to plot (default: all columns)
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Number of equal-width bins
        #[arg(short, long, default_value_t = tally::core::histogram::DEFAULT_BINS)]
        bins: usize,
    },

    #[command(long_about = "Watch a CSV file and re-run the analysis on every change.

Monitors the file's directory with a debounce so editor save sequences
trigger a single run. All analyze flags apply to each run.

Press Ctrl+C to stop watching.")]
    /// Re-run the analysis whenever the file changes
    Watch {
        /// Path to CSV file to watch
        file: PathBuf,

        /// Column to filter on (requires --filter-value)
        #[arg(long)]
        filter_column: Option<String>,

        /// Exact value rows must match in the filter column
        #[arg(long)]
        filter_value: Option<String>,

        /// Column to sort rows by (lexicographic string order)
        #[arg(long)]
        sort_column: Option<String>,

        /// Column holding YYYY-MM-DD dates for oldest/newest reporting
        #[arg(long)]
        date_column: Option<String>,

        /// Comma-separated columns to analyze (default: all columns)
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> TallyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            filter_column,
            filter_value,
            sort_column,
            date_column,
            columns,
            format,
            verbose,
        } => cli::analyze(
            file,
            AnalyzeOptions {
                filter_column,
                filter_value,
                sort_column,
                date_column,
                columns,
                format,
                verbose,
            },
        ),

        Commands::Columns { file } => cli::columns(file),

        Commands::Histogram {
            file,
            columns,
            bins,
        } => cli::histogram(file, columns, bins),

        Commands::Watch {
            file,
            filter_column,
            filter_value,
            sort_column,
            date_column,
            columns,
            verbose,
        } => cli::watch(
            file,
            AnalyzeOptions {
                filter_column,
                filter_value,
                sort_column,
                date_column,
                columns,
                format: OutputFormat::Table,
                verbose,
            },
        ),
    }
}

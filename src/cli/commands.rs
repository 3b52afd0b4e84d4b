use crate::core::{self, histogram};
use crate::error::{TallyError, TallyResult};
use crate::reader;
use crate::types::{AnalysisConfig, AnalysisReport, Table};
use clap::ValueEnum;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Output format for the analyze command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Machine-readable JSON
    Json,
}

/// Flags shared by `analyze` and `watch`.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub filter_column: Option<String>,
    pub filter_value: Option<String>,
    pub sort_column: Option<String>,
    pub date_column: Option<String>,
    /// `None` selects every header column.
    pub columns: Option<Vec<String>>,
    pub format: OutputFormat,
    pub verbose: bool,
}

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display; also hides float artifacts
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Treat empty strings as "disabled", like the blank form fields they
/// replace.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Build the pipeline configuration from CLI flags plus the loaded header.
fn build_config(table: &Table, opts: &AnalyzeOptions) -> AnalysisConfig {
    let columns = match &opts.columns {
        Some(names) => names.clone(),
        None => table.header.clone(),
    };

    AnalysisConfig {
        filter_column: non_empty(opts.filter_column.clone()),
        filter_value: non_empty(opts.filter_value.clone()),
        sort_column: non_empty(opts.sort_column.clone()),
        date_column: non_empty(opts.date_column.clone()),
        columns,
    }
}

/// Execute the analyze command
pub fn analyze(file: PathBuf, opts: AnalyzeOptions) -> TallyResult<()> {
    if opts.format == OutputFormat::Table {
        println!("{}", "📊 Tally - CSV Analysis".bold().green());
        println!("   File: {}\n", file.display());
    }

    run_analysis(&file, &opts)
}

/// Load, analyze, and render one pass. Shared by `analyze` and `watch`.
fn run_analysis(file: &Path, opts: &AnalyzeOptions) -> TallyResult<()> {
    let table = reader::read_table(file)?;

    if opts.verbose && opts.format == OutputFormat::Table {
        println!(
            "   Found {} columns, {} rows",
            table.header.len(),
            table.row_count()
        );
        if let (Some(column), Some(value)) = (
            non_empty(opts.filter_column.clone()),
            non_empty(opts.filter_value.clone()),
        ) {
            println!("   Filter: {} = '{}'", column.cyan(), value);
        }
        println!();
    }

    let config = build_config(&table, opts);
    let report = core::analyze(&table, &config)?;

    match opts.format {
        OutputFormat::Table => render_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn render_report(report: &AnalysisReport) {
    if !report.summaries.is_empty() {
        println!("{}", "📈 Column Statistics:".bold().cyan());
        println!("{}", "─".repeat(96));
        println!(
            "{:<16}{:>8}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}",
            "Column".bold(),
            "Count".bold(),
            "Average".bold(),
            "Minimum".bold(),
            "Maximum".bold(),
            "Median".bold(),
            "Mode".bold(),
            "Std Dev".bold()
        );
        println!("{}", "─".repeat(96));

        for summary in &report.summaries {
            let mode = summary
                .mode
                .map_or_else(|| "No mode".to_string(), format_number);
            println!(
                "{:<16}{:>8}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}",
                summary.column.bright_blue(),
                summary.count,
                format_number(summary.mean).green(),
                format_number(summary.min),
                format_number(summary.max),
                format_number(summary.median),
                mode,
                format_number(summary.std_dev)
            );
        }
        println!("{}", "─".repeat(96));
        println!();
    }

    if let Some(range) = &report.date_range {
        println!(
            "📅 Column '{}': Oldest = {}, Newest = {}",
            range.column.bright_blue(),
            range.oldest.to_string().green(),
            range.newest.to_string().green()
        );
        println!();
    }

    for warning in &report.warnings {
        println!("{}  {}", "⚠️".yellow(), warning.to_string().yellow());
    }
    if !report.warnings.is_empty() {
        println!();
    }

    if report.has_results() {
        println!("{}", "✅ Analysis complete".bold().green());
    } else {
        println!("{}", "⚠️  No results produced".bold().yellow());
    }
}

/// Execute the columns command - list header columns with positions
pub fn columns(file: PathBuf) -> TallyResult<()> {
    println!("{}", "📋 Tally - Columns".bold().green());
    println!("   File: {}\n", file.display());

    let table = reader::read_table(&file)?;

    for (idx, name) in table.header.iter().enumerate() {
        println!("   {:>3}  {}", idx, name.bright_blue());
    }
    println!("\n   {} columns, {} rows", table.header.len(), table.row_count());

    Ok(())
}

/// Execute the histogram command
pub fn histogram(file: PathBuf, columns: Option<Vec<String>>, bins: usize) -> TallyResult<()> {
    println!("{}", "📊 Tally - Histograms".bold().green());
    println!("   File: {}\n", file.display());

    if bins == 0 {
        return Err(TallyError::Config("bin count must be at least 1".to_string()));
    }

    let table = reader::read_table(&file)?;
    let selected = columns.unwrap_or_else(|| table.header.clone());

    let mut warnings = Vec::new();
    let histograms = histogram::build_for_table(&table, &selected, bins, &mut warnings);

    for histogram in &histograms {
        render_histogram(histogram);
    }

    for warning in &warnings {
        println!("{}  {}", "⚠️".yellow(), warning.to_string().yellow());
    }

    if histograms.is_empty() {
        println!("{}", "⚠️  Nothing to plot".bold().yellow());
    }

    Ok(())
}

const BAR_WIDTH: usize = 40;

fn render_histogram(histogram: &core::Histogram) {
    println!(
        "{} {} ({} values)",
        "Histogram of".bold(),
        histogram.column.bright_blue().bold(),
        histogram.values
    );

    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &histogram.bins {
        let bar = if max_count == 0 {
            0
        } else {
            // Round up so non-empty bins always show at least one block
            (bin.count * BAR_WIDTH).div_ceil(max_count)
        };
        println!(
            "  [{:>10} .. {:>10}) {:>6}  {}",
            format_number(bin.lower),
            format_number(bin.upper),
            bin.count,
            "█".repeat(bar).cyan()
        );
    }
    println!();
}

/// Execute the watch command - re-analyze whenever the file changes
pub fn watch(file: PathBuf, opts: AnalyzeOptions) -> TallyResult<()> {
    println!("{}", "👁️  Tally - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(TallyError::Watch(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize()?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| TallyError::Watch("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Debounce so an editor's save-in-progress doesn't trigger twice
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| TallyError::Watch(format!("Failed to create file watcher: {e}")))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| TallyError::Watch(format!("Failed to watch directory: {e}")))?;

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&file, &opts);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    if event.kind != DebouncedEventKind::Any {
                        return false;
                    }
                    if let Ok(event_canonical) = event.path.canonicalize() {
                        if event_canonical == canonical_path {
                            return true;
                        }
                    }
                    event
                        .path
                        .file_name()
                        .is_some_and(|name| Some(name) == canonical_path.file_name())
                });

                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        chrono::Local::now().format("%H:%M:%S").to_string().cyan()
                    );
                    run_watch_action(&file, &opts);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn run_watch_action(file: &Path, opts: &AnalyzeOptions) {
    match run_analysis(file, opts) {
        Ok(()) => {}
        Err(e) => println!("{} {}", "❌ Analysis failed:".bold().red(), e),
    }
}

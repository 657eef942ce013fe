//! ttlint - lint class-schedule sheets exported as CSV

mod cache;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use timetable_lint::prelude::*;
use timetable_lint::EntryModifiers;
use timetable_lint_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use tracing_subscriber::EnvFilter;

use crate::cache::FileCache;

const SCHEDULE_SHEET: &str = "Schedule";

/// Rows searched for the reference dataset's header row
const HEADER_SEARCH_ROWS: u32 = 10;

#[derive(Parser)]
#[command(name = "ttlint")]
#[command(author, version, about = "Lint university class-schedule sheets", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the course and group header rows
    Header(Input),

    /// Lint every schedule entry and stage unknown subjects and locations
    Schedule(Input),

    /// Check the text hygiene of every cell
    Common(Input),

    /// Fix spacing around words and brackets
    FixSpaces(Input),

    /// Select and list the schedule grids
    Grids(Input),

    /// Append staged unknown subjects to the reference dataset
    PromoteSubjects(Input),

    /// Append staged unknown locations to the reference dataset
    PromoteLocations(Input),

    /// Create an empty reference dataset
    InitSettings(Input),

    /// Show where the reference dataset lives
    Settings(Input),

    /// Select a cell or block of the schedule sheet
    Focus {
        #[command(flatten)]
        input: Input,

        /// Cell or block, e.g. B3 or B3:C5
        target: String,
    },
}

impl Commands {
    fn input(&self) -> &Input {
        match self {
            Commands::Header(input)
            | Commands::Schedule(input)
            | Commands::Common(input)
            | Commands::FixSpaces(input)
            | Commands::Grids(input)
            | Commands::PromoteSubjects(input)
            | Commands::PromoteLocations(input)
            | Commands::InitSettings(input)
            | Commands::Settings(input)
            | Commands::Focus { input, .. } => input,
        }
    }
}

#[derive(Args)]
struct Input {
    /// Schedule sheet as CSV
    schedule: PathBuf,

    /// Reference dataset sheet as CSV
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Merged region of the schedule sheet, e.g. B4:C4 (repeatable)
    #[arg(short, long = "merge", value_name = "RANGE")]
    merges: Vec<String>,

    /// Restrict header, hygiene and fix operations to a block
    #[arg(long, value_name = "RANGE")]
    range: Option<String>,

    /// Sheet id reported with every warning
    #[arg(long, default_value_t = 0)]
    sheet_id: u32,

    /// File keeping staged values between runs
    #[arg(long, default_value = ".ttlint-cache.json")]
    cache: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Save modified sheets back to their CSV files
    #[arg(short, long)]
    write: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Serialize)]
struct Report {
    warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    modifiers: Vec<EntryModifiers>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    selected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = cli.command.input();
    let creating = matches!(cli.command, Commands::InitSettings(_));
    let workbook = load_workbook(input, creating)?;
    let cache = FileCache::open(&input.cache)?;

    let mut session = LintSession::with_cache(workbook, cache, SessionOptions::default());
    if let Some(range) = &input.range {
        let range = CellRange::decode(range).with_context(|| format!("Invalid range '{}'", range))?;
        session = session.with_target_range(range);
    }

    let mut report = Report::default();
    match &cli.command {
        Commands::Header(_) => {
            report.warnings = session.lint_header().context("Header lint failed")?;
        }
        Commands::Schedule(_) => {
            let lint = session.lint_schedule().context("Schedule lint failed")?;
            report.warnings = lint.warnings;
            report.modifiers = lint.modifiers;
        }
        Commands::Common(_) => {
            report.warnings = session.lint_common().context("Hygiene lint failed")?;
        }
        Commands::FixSpaces(_) => {
            report.fixed = Some(session.fix_spaces().context("Spacing fix failed")?);
        }
        Commands::Grids(_) => {
            report.warnings = session.select_grids().context("Grid selection failed")?;
            report.selected = selection(session.workbook());
        }
        Commands::PromoteSubjects(_) => {
            report.warnings = session.promote_unknown_subjects()?;
            report.selected = selection(session.workbook());
        }
        Commands::PromoteLocations(_) => {
            report.warnings = session.promote_unknown_locations()?;
            report.selected = selection(session.workbook());
        }
        Commands::InitSettings(_) => {
            report.warnings = session.create_reference_dataset()?;
            report.selected = selection(session.workbook());
        }
        Commands::Settings(_) => {
            report.warnings = session.go_to_reference_dataset()?;
            report.settings = session
                .reference_dataset_location()
                .map(|(gid, range)| format!("gid={} range={}", gid, range.encode()));
        }
        Commands::Focus { target, .. } => {
            session
                .focus_on_range(target)
                .with_context(|| format!("Cannot focus on '{}'", target))?;
            report.selected = selection(session.workbook());
        }
    }

    session.cache_mut().save()?;
    print_report(&report, input.format)?;

    if input.write {
        save(&cli.command, session.workbook())?;
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

/// Schedule sheet at index 0, reference sheet (if any) after it
fn load_workbook(input: &Input, creating: bool) -> Result<Workbook> {
    let mut workbook = Workbook::empty();

    let options = CsvReadOptions::default().with_sheet_name(SCHEDULE_SHEET);
    let schedule = CsvReader::read_file(&input.schedule, &options)
        .with_context(|| format!("Failed to read '{}'", input.schedule.display()))?;
    let index = workbook.add_existing_worksheet(schedule)?;

    let sheet = workbook
        .worksheet_mut(index)
        .context("Schedule sheet missing after load")?;
    sheet.set_id(input.sheet_id);
    for merge in &input.merges {
        let region = CellRange::decode(merge).with_context(|| format!("Invalid merged region '{}'", merge))?;
        sheet
            .merge_cells(&region)
            .with_context(|| format!("Cannot merge '{}'", merge))?;
    }

    if let Some(path) = &input.reference {
        if creating && !path.exists() {
            tracing::debug!("'{}' does not exist yet", path.display());
        } else {
            let name = SessionOptions::default().reference_name;
            let options = CsvReadOptions::default().with_sheet_name(name.as_str());
            let reference = CsvReader::read_file(path, &options)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;

            let header_row = find_header_row(&reference);
            let range = CellRange::new(
                header_row,
                1,
                reference.max_rows().max(header_row) - header_row + 1,
                reference.max_columns().max(1),
            );
            tracing::debug!("Reference dataset at {}", range.encode());

            let index = workbook.add_existing_worksheet(reference)?;
            workbook.define_name(&name, index, range)?;
        }
    }

    workbook.set_active_sheet(0)?;
    Ok(workbook)
}

/// First row holding a known field header, or row 1
fn find_header_row(sheet: &Worksheet) -> u32 {
    (1..=sheet.max_rows().min(HEADER_SEARCH_ROWS))
        .find(|&row| {
            (1..=sheet.max_columns()).any(|col| {
                sheet
                    .value_ref_at(row, col)
                    .and_then(CellValue::as_str)
                    .is_some_and(|v| FieldKind::from_header(v).is_some())
            })
        })
        .unwrap_or(1)
}

fn selection(workbook: &Workbook) -> Vec<String> {
    workbook
        .active_worksheet()
        .map(|sheet| sheet.active_ranges().iter().map(CellRange::encode).collect())
        .unwrap_or_default()
}

fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            for warning in &report.warnings {
                println!("{}", warning);
            }
            for entry in &report.modifiers {
                for modifier in &entry.modifiers {
                    println!(
                        "{}: {:?} '{}'{}",
                        entry.range.encode(),
                        modifier.event_kind,
                        modifier.event,
                        modifier
                            .additional
                            .as_ref()
                            .map(|a| format!(" when '{}'", a.text))
                            .unwrap_or_default()
                    );
                }
            }
            if let Some(fixed) = report.fixed {
                println!("Fixed {} cells", fixed);
            }
            if let Some(settings) = &report.settings {
                println!("Settings: {}", settings);
            }
            if !report.selected.is_empty() {
                println!("Selected {}", report.selected.join(", "));
            }
            if report.warnings.is_empty() {
                eprintln!("No warnings");
            }
        }
    }
    Ok(())
}

fn save(command: &Commands, workbook: &Workbook) -> Result<()> {
    let input = command.input();
    let options = CsvWriteOptions::default();

    match command {
        Commands::FixSpaces(_) => {
            let sheet = workbook.worksheet(0).context("Schedule sheet missing")?;
            CsvWriter::write_file(sheet, &input.schedule, &options)
                .with_context(|| format!("Failed to write '{}'", input.schedule.display()))?;
            tracing::info!("Saved '{}'", input.schedule.display());
        }
        Commands::PromoteSubjects(_) | Commands::PromoteLocations(_) | Commands::InitSettings(_) => {
            let Some(path) = &input.reference else {
                bail!("--reference is required to save the reference dataset");
            };
            let name = SessionOptions::default().reference_name;
            let Some(named) = workbook.named_range(&name) else {
                return Ok(());
            };
            let sheet = workbook
                .worksheet(named.sheet)
                .context("Reference sheet missing")?;
            CsvWriter::write_file(sheet, path, &options.trimmed())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            tracing::info!("Saved '{}'", path.display());
        }
        _ => tracing::debug!("Nothing to save"),
    }
    Ok(())
}

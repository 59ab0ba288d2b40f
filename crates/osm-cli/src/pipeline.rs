//! Pipeline stages: read, transform, validate, write, reconcile.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, info_span};

use osm_ingest::{OsmReader, ReadCounts};
use osm_model::Table;
use osm_output::{CsvSink, DryRunSink, RecordSink, RowCounts, TableFileNames, table_row_counts};
use osm_transform::{Ledger, TransformOptions, XmlCensus, transform_entity};
use osm_validate::SchemaGate;

/// Everything a `process` run needs.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub file_names: TableFileNames,
    pub validate: bool,
    pub dry_run: bool,
    pub transform: TransformOptions,
    /// Show a spinner on stderr when it is a terminal.
    pub progress: bool,
}

impl ProcessOptions {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            file_names: TableFileNames::default(),
            validate: true,
            dry_run: false,
            transform: TransformOptions::default(),
            progress: false,
        }
    }
}

/// Outcome of a `process` run.
#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub output_dir: Option<PathBuf>,
    pub ledger: Ledger,
    pub rows: RowCounts,
    pub read_counts: ReadCounts,
    pub validated: bool,
    pub records_checked: u64,
    pub duration: Duration,
}

/// Cleans one extract into the five tables.
pub fn process(options: &ProcessOptions) -> Result<ProcessResult> {
    let span = info_span!("process", input = %options.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut reader = OsmReader::open(&options.input)
        .with_context(|| format!("open {}", options.input.display()))?;
    let mut ledger = Ledger::new();
    let mut gate = SchemaGate::new(options.validate);
    let progress = spinner(options.progress)?;

    let rows = if options.dry_run {
        let mut sink = DryRunSink::new();
        clean_records(&mut reader, &mut sink, &mut gate, &mut ledger, options, &progress)?;
        sink.row_counts().clone()
    } else {
        let mut sink = CsvSink::create(&options.output_dir, &options.file_names)
            .context("create output tables")?;
        clean_records(&mut reader, &mut sink, &mut gate, &mut ledger, options, &progress)?;
        let rows = sink.row_counts().clone();
        sink.finish().context("flush output tables")?;
        rows
    };
    progress.finish_and_clear();

    let read_counts = reader.into_counts();
    ledger.record_element_counts(read_counts.elements, read_counts.foreign_elements);

    info!(
        elements = read_counts.elements,
        entities = ledger.counts().entities(),
        rows = rows.total(),
        values_eliminated = ledger.counts().values_eliminated,
        duration_ms = start.elapsed().as_millis(),
        "process complete"
    );

    Ok(ProcessResult {
        input: options.input.clone(),
        output_dir: (!options.dry_run).then(|| options.output_dir.clone()),
        ledger,
        rows,
        read_counts,
        validated: gate.is_enabled(),
        records_checked: gate.checked(),
        duration: start.elapsed(),
    })
}

fn clean_records<R: BufRead, S: RecordSink>(
    reader: &mut OsmReader<R>,
    sink: &mut S,
    gate: &mut SchemaGate,
    ledger: &mut Ledger,
    options: &ProcessOptions,
    progress: &ProgressBar,
) -> Result<()> {
    let _span = info_span!("transform").entered();
    for entity in reader.by_ref() {
        let entity = entity.context("read extract")?;
        progress.inc(1);
        let Some(record) = transform_entity(&entity, ledger, &options.transform) else {
            continue;
        };
        gate.check(&record)?;
        sink.write_record(&record)?;
    }
    Ok(())
}

fn spinner(enabled: bool) -> Result<ProgressBar> {
    if !enabled || !io::stderr().is_terminal() {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} {pos} nodes and ways [{elapsed}]")
            .context("progress style")?,
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

/// JSON document written by `--ledger-json`.
#[derive(Debug, Serialize)]
pub struct LedgerReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub input: &'a Path,
    pub rows: &'a RowCounts,
    pub ledger: &'a Ledger,
}

impl<'a> LedgerReport<'a> {
    pub fn new(result: &'a ProcessResult) -> Self {
        Self {
            generated_at: Utc::now(),
            input: &result.input,
            rows: &result.rows,
            ledger: &result.ledger,
        }
    }
}

pub fn write_ledger_json(result: &ProcessResult, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create ledger file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &LedgerReport::new(result))
        .with_context(|| format!("write ledger file {}", path.display()))?;
    info!(path = %path.display(), "wrote ledger");
    Ok(())
}

/// One line of the reconciliation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileRow {
    pub table: Table,
    /// Rows the extract could contribute.
    pub xml: u64,
    /// Rows dropped for structural reasons (bad ids, bad member refs).
    pub eliminated: u64,
    pub csv: u64,
    /// Rows lost to value-level cleaning.
    pub difference: i64,
}

impl ReconcileRow {
    fn new(table: Table, xml: u64, eliminated: u64, csv: u64) -> Self {
        let difference = xml as i64 - eliminated as i64 - csv as i64;
        Self {
            table,
            xml,
            eliminated,
            csv,
            difference,
        }
    }
}

#[derive(Debug)]
pub struct ReconcileResult {
    pub census: XmlCensus,
    pub read_counts: ReadCounts,
    pub rows: RowCounts,
    pub lines: Vec<ReconcileRow>,
}

/// Re-scans the extract and compares it with the written tables.
pub fn reconcile(
    input: &Path,
    output_dir: &Path,
    names: &TableFileNames,
) -> Result<ReconcileResult> {
    let span = info_span!("reconcile", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut reader =
        OsmReader::open(input).with_context(|| format!("open {}", input.display()))?;
    let mut census = XmlCensus::new();
    for entity in reader.by_ref() {
        census.observe(&entity.context("read extract")?);
    }
    let read_counts = reader.into_counts();
    let rows = table_row_counts(output_dir, names).context("count CSV rows")?;
    let lines = reconcile_lines(&census, &rows);

    info!(
        elements = read_counts.elements,
        rows = rows.total(),
        duration_ms = start.elapsed().as_millis(),
        "reconcile complete"
    );
    Ok(ReconcileResult {
        census,
        read_counts,
        rows,
        lines,
    })
}

pub fn reconcile_lines(census: &XmlCensus, rows: &RowCounts) -> Vec<ReconcileRow> {
    vec![
        ReconcileRow::new(
            Table::Nodes,
            census.node.entities,
            census.node.bad_ids,
            rows.get(Table::Nodes),
        ),
        ReconcileRow::new(
            Table::NodesTags,
            census.node.recognized_tags,
            census.node.recognized_tags_under_bad_id,
            rows.get(Table::NodesTags),
        ),
        ReconcileRow::new(
            Table::Ways,
            census.way.entities,
            census.way.bad_ids,
            rows.get(Table::Ways),
        ),
        ReconcileRow::new(
            Table::WaysNodes,
            census.member_refs,
            census.bad_member_refs,
            rows.get(Table::WaysNodes),
        ),
        ReconcileRow::new(
            Table::WaysTags,
            census.way.recognized_tags,
            census.way.recognized_tags_under_bad_id,
            rows.get(Table::WaysTags),
        ),
    ]
}

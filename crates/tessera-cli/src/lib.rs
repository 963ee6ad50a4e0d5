//! CLI logic for the Tessera layout migration dry run.
//!
//! The CLI reads a batch file holding a snapshot of the migration backend and
//! the rows to migrate, runs every row through a [`LayoutMigrator`] and writes
//! the resulting layouts together with the saved migration messages.
//!
//! A batch file looks like:
//!
//! ```json
//! {
//!   "store": { "paragraphs": { "11": "text" }, "id_maps": {}, "blocks": {}, "layouts": {} },
//!   "rows": [{ "id": 1, "properties": { "field_paragraphs": [{ "value": 11 }] } }]
//! }
//! ```

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use tessera::{
    Collaborators, LayoutMigrator, TesseraError,
    collection::FlatLayout,
    identifier::SourceId,
    memory::MemoryStore,
    process::SourceRow,
    report::{LogDisplay, MessageLog, MigrationMessage, Reporter},
    severity::Severity,
    source::RandomUuid,
};

/// The input of a dry run.
#[derive(Debug, Deserialize)]
struct Batch {
    #[serde(default)]
    store: MemoryStore,
    rows: Vec<SourceRow>,
}

/// The migrated layout of one row.
#[derive(Debug, Serialize)]
struct MigratedRow {
    id: SourceId,
    layout: FlatLayout,
}

/// Row counts of a finished dry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows read from the batch.
    pub rows: usize,
    /// Rows whose layout was written.
    pub migrated: usize,
    /// Paragraphs skipped for missing dependencies.
    pub warnings: usize,
}

impl RunSummary {
    /// Returns the number of rows that failed.
    pub fn failed(&self) -> usize {
        self.rows - self.migrated
    }
}

/// The output of a dry run.
#[derive(Debug, Serialize)]
struct Report<'a> {
    rows: Vec<MigratedRow>,
    messages: &'a [MigrationMessage],
}

/// Run the Tessera CLI application
///
/// Migrates every row of the input batch and writes the layouts and the
/// migration messages to the output file. A row that fails is left out of
/// the layouts and recorded as an error message; the remaining rows are
/// still migrated. Returns the row counts of the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TesseraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed batch files
pub fn run(args: &Args) -> Result<RunSummary, TesseraError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing batch"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let content = fs::read_to_string(&args.input)?;
    let batch: Batch = serde_json::from_str(&content)?;

    let mut migrator =
        LayoutMigrator::new(app_config, Collaborators::from_store(&batch.store, &RandomUuid));
    let mut log = MessageLog::new().with_display(LogDisplay);
    let mut rows = Vec::with_capacity(batch.rows.len());

    for row in &batch.rows {
        log.begin_row(row.id());
        match migrator.migrate_row(row, &mut log) {
            Ok(layout) => rows.push(MigratedRow {
                id: row.id(),
                layout,
            }),
            Err(err) => {
                error!(row_id = row.id().get(), err:%; "Row migration failed");
                log.save_message(&err.to_string(), Severity::Error);
            }
        }
        log.end_row();
    }

    let summary = RunSummary {
        rows: batch.rows.len(),
        migrated: rows.len(),
        warnings: log.count(Severity::Warning),
    };
    debug!(
        errors = log.count(Severity::Error),
        messages = log.messages().len();
        "Batch migrated"
    );

    let report = Report {
        rows,
        messages: log.messages(),
    };
    fs::write(&args.output, serde_json::to_string_pretty(&report)?)?;

    info!(output_file = args.output; "Layouts exported successfully");

    Ok(summary)
}

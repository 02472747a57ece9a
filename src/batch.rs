//! Batch cleaning: many strings at once, or one column of a CSV table.
//!
//! Rows are independent, so they are cleaned in parallel with rayon; results
//! are collected back in input order.

use crate::batch_options::BatchOptions;
use crate::cleanup::TextCleaner;
use crate::error::{Error, Result};
use crate::output::OutputTarget;
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Summary of a CSV column run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvSummary {
    /// Data rows processed (header excluded).
    pub rows: usize,
    /// Cells cleaned.
    pub cleaned: usize,
    /// Cells left unchanged because they were not text (lenient mode only).
    pub skipped: usize,
    /// File written, when the table was persisted.
    pub path: Option<PathBuf>,
}

/// Cleans every string, preserving order.
///
/// # Example
///
/// ```
/// use tigrinya_cleaner::{batch, TextCleaner};
///
/// let cleaner = TextCleaner::default();
/// let cleaned = batch::clean_all(&cleaner, &["ሠላም!", "<i>2024</i> ዓመት"]);
/// assert_eq!(cleaned, vec!["ሰላም", "ዓመት"]);
/// ```
pub fn clean_all<S>(cleaner: &TextCleaner, texts: &[S]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    texts.par_iter().map(|t| cleaner.clean(t.as_ref())).collect()
}

enum CellOutcome {
    Cleaned(ByteRecord),
    Skipped(ByteRecord),
}

/// Cleans one column of a CSV table read from `reader` and writes the whole
/// table to `writer`.
///
/// The header row is required. A missing `column` fails with
/// [`Error::ColumnNotFound`] before any row is processed, and nothing is
/// written. Other columns are copied unchanged.
///
/// Rows shorter than the header are padded with empty fields, so a missing
/// cell cleans to an empty string. Longer rows keep their extra fields.
pub fn clean_csv_column<R, W>(
    reader: R,
    writer: W,
    column: &str,
    cleaner: &TextCleaner,
    options: &BatchOptions,
) -> Result<CsvSummary>
where
    R: Read,
    W: Write,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.byte_headers()?.clone();

    let index = headers
        .iter()
        .position(|h| h == column.as_bytes())
        .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;

    let records = rdr.byte_records().collect::<std::result::Result<Vec<_>, _>>()?;

    let width = headers.len();
    let clean_row = |(row, record): (usize, &ByteRecord)| {
        clean_record(row, record, index, width, cleaner, options)
    };
    let outcomes: Vec<CellOutcome> = if options.parallel {
        records
            .par_iter()
            .enumerate()
            .map(clean_row)
            .collect::<Result<_>>()?
    } else {
        records
            .iter()
            .enumerate()
            .map(clean_row)
            .collect::<Result<_>>()?
    };

    let mut summary = CsvSummary {
        rows: outcomes.len(),
        ..CsvSummary::default()
    };

    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_byte_record(&headers)?;
    for outcome in &outcomes {
        let record = match outcome {
            CellOutcome::Cleaned(record) => {
                summary.cleaned += 1;
                record
            }
            CellOutcome::Skipped(record) => {
                summary.skipped += 1;
                record
            }
        };
        wtr.write_byte_record(record)?;
    }
    wtr.flush()?;

    Ok(summary)
}

/// Cleans one column of a CSV file and writes the table to `target`.
///
/// The input is fully processed before anything is written, so a failed run
/// leaves no partial output.
///
/// # Example
///
/// ```no_run
/// use tigrinya_cleaner::{batch, BatchOptions, OutputTarget, TextCleaner};
///
/// let cleaner = TextCleaner::from_config_file("config.json")?;
/// let target = OutputTarget::new("cleaned_data", "cleaned.csv");
/// let summary = batch::clean_csv_file("news.csv", "text", &target, &cleaner, &BatchOptions::default())?;
/// println!("{} rows", summary.rows);
/// # Ok::<(), tigrinya_cleaner::Error>(())
/// ```
pub fn clean_csv_file(
    input: impl AsRef<Path>,
    column: &str,
    target: &OutputTarget,
    cleaner: &TextCleaner,
    options: &BatchOptions,
) -> Result<CsvSummary> {
    let file = File::open(input.as_ref())?;

    let mut buffer = Vec::new();
    let mut summary = clean_csv_column(file, &mut buffer, column, cleaner, options)?;

    fs::create_dir_all(&target.dir)?;
    let path = target.path();
    fs::write(&path, &buffer)?;

    tracing::info!(
        path = %path.display(),
        rows = summary.rows,
        skipped = summary.skipped,
        "cleaned CSV saved"
    );

    summary.path = Some(path);
    Ok(summary)
}

fn clean_record(
    row: usize,
    record: &ByteRecord,
    index: usize,
    width: usize,
    cleaner: &TextCleaner,
    options: &BatchOptions,
) -> Result<CellOutcome> {
    let record = &pad_record(record, width);
    let cell = record.get(index).unwrap_or_default();

    let text = match std::str::from_utf8(cell) {
        Ok(text) => text,
        Err(e) if options.is_lenient() => {
            tracing::warn!(row = row + 1, error = %e, "cell is not text; left unchanged");
            return Ok(CellOutcome::Skipped(record.clone()));
        }
        Err(e) => {
            return Err(Error::InvalidArgument(format!(
                "row {}: cell is not valid UTF-8 text: {}",
                row + 1,
                e
            )));
        }
    };

    let cleaned = cleaner.clean(text);

    let mut out = ByteRecord::with_capacity(record.as_slice().len(), record.len());
    for (i, field) in record.iter().enumerate() {
        if i == index {
            out.push_field(cleaned.as_bytes());
        } else {
            out.push_field(field);
        }
    }
    Ok(CellOutcome::Cleaned(out))
}

fn pad_record(record: &ByteRecord, width: usize) -> ByteRecord {
    let mut padded = record.clone();
    for _ in record.len()..width {
        padded.push_field(b"");
    }
    padded
}

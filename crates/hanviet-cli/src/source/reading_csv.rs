use std::fs;
use std::path::Path;

use tracing::{debug, debug_span};

use hanviet_core::settings::{settings, SourceSettings};
use hanviet_core::table::{is_compiled, ReadingRow, ReadingTable};

use super::{field, CsvTable, SourceError};

/// Parse reading-table CSV content into rows.
///
/// The header selects the character, pronunciation and reading columns by the
/// names in `columns`; the pronunciation column is optional. Lines too short
/// to hold the character and reading fields are skipped.
pub fn parse_reading_csv(
    content: &str,
    columns: &SourceSettings,
) -> Result<Vec<ReadingRow>, SourceError> {
    let csv = CsvTable::parse(content)?;
    let char_idx = csv.require_column(&columns.char_column)?;
    let reading_idx = csv.require_column(&columns.reading_column)?;
    let pron_idx = csv.column(&columns.pronunciation_column);

    let total = csv.rows.len();
    let mut rows = Vec::with_capacity(total);
    for fields in &csv.rows {
        let (Some(character), Some(reading)) = (field(fields, char_idx), field(fields, reading_idx))
        else {
            continue;
        };
        let pronunciation = pron_idx.and_then(|i| field(fields, i));
        rows.push(ReadingRow::new(character, pronunciation, reading));
    }

    let skipped = total - rows.len();
    eprintln!("  (skipped {skipped} of {total} lines)");
    Ok(rows)
}

/// Load a reading table from either a compiled table or a CSV source,
/// detected by the leading magic bytes.
pub fn load_table(path: &Path) -> Result<ReadingTable, SourceError> {
    let _span = debug_span!("load_table", path = %path.display()).entered();
    eprintln!("Reading {}...", path.display());
    let data = fs::read(path)?;

    if is_compiled(&data) {
        debug!("compiled table");
        return Ok(ReadingTable::from_bytes(&data)?);
    }

    let content = String::from_utf8(data)
        .map_err(|e| SourceError::Parse(format!("{}: {e}", path.display())))?;
    let s = settings();
    let rows = parse_reading_csv(&content, &s.source)?;
    debug!(rows = rows.len());
    Ok(ReadingTable::build_with(rows, &s.table.options()))
}

//! File ingestion: reading-table CSV, vocabulary JSON and sentence CSV.

mod reading_csv;
mod sentences;
mod vocab;

use std::io;

use csv_core::ReadFieldResult;

use hanviet_core::table::TableError;

pub use reading_csv::{load_table, parse_reading_csv};
pub use sentences::{parse_sentences_csv, SentenceFilter};
pub use vocab::{no_match_path, parse_vocab_json, JsonRecord};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table error: {0}")]
    Table(#[from] TableError),
}

/// Split CSV content into records of fields. Quoted fields may span lines;
/// records end only where the reader reports `record_end`.
pub(crate) fn parse_csv_records(content: &str) -> Result<Vec<Vec<String>>, SourceError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut rdr = csv_core::Reader::new();
    let mut input = content.as_bytes();
    let mut field: Vec<u8> = Vec::new();
    let mut output = [0u8; 1024];

    loop {
        let (result, nin, nout) = rdr.read_field(input, &mut output);
        input = &input[nin..];
        field.extend_from_slice(&output[..nout]);
        match result {
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                let text = String::from_utf8(std::mem::take(&mut field))
                    .map_err(|e| SourceError::Parse(format!("invalid UTF-8 in field: {e}")))?;
                record.push(text);
                if record_end {
                    records.push(std::mem::take(&mut record));
                }
            }
            ReadFieldResult::End => break,
        }
    }
    if !record.is_empty() {
        records.push(record);
    }
    Ok(records)
}

/// Header-indexed CSV content: the first non-blank record is the header, every
/// later non-blank record a row.
pub(crate) struct CsvTable {
    header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn parse(content: &str) -> Result<Self, SourceError> {
        let content = content.trim_start_matches('\u{FEFF}');
        let mut records = parse_csv_records(content)?
            .into_iter()
            .filter(|record| record.iter().any(|f| !f.trim().is_empty()));

        let header = records
            .next()
            .ok_or_else(|| SourceError::Parse("missing CSV header".to_string()))?
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();

        Ok(Self {
            header,
            rows: records.collect(),
        })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, SourceError> {
        self.column(name).ok_or_else(|| {
            SourceError::Parse(format!(
                "missing column '{name}' (found: {})",
                self.header.join(", ")
            ))
        })
    }
}

/// Trimmed field at `index`, or `None` if the row is too short.
pub(crate) fn field(row: &[String], index: usize) -> Option<&str> {
    row.get(index).map(|f| f.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_records_plain_and_quoted() {
        assert_eq!(
            parse_csv_records("字,zi4,tự\n").unwrap(),
            vec![vec!["字", "zi4", "tự"]]
        );
        assert_eq!(
            parse_csv_records("行,\"xing2\",\"['hành', 'hạnh']\"").unwrap(),
            vec![vec!["行", "xing2", "['hành', 'hạnh']"]]
        );
        assert_eq!(parse_csv_records("a,,c").unwrap(), vec![vec!["a", "", "c"]]);
        assert_eq!(
            parse_csv_records("\"say \"\"hi\"\"\"").unwrap(),
            vec![vec!["say \"hi\""]]
        );
    }

    #[test]
    fn csv_records_quoted_newline_stays_in_field() {
        let records = parse_csv_records("a,\"line one\nline two\",b\r\nc,d,e\n").unwrap();
        assert_eq!(
            records,
            vec![vec!["a", "line one\nline two", "b"], vec!["c", "d", "e"]]
        );
    }

    #[test]
    fn csv_record_longer_than_buffer() {
        let long = "x".repeat(3000);
        let content = format!("{long},y\nz");
        let records = parse_csv_records(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][0].len(), 3000);
        assert_eq!(records[0][1], "y");
        assert_eq!(records[1], vec!["z"]);
    }

    #[test]
    fn csv_table_header_lookup() {
        let table = CsvTable::parse("\u{FEFF}char, pinyin ,hanviet\r\n字,zi4,tự\r\n\r\n").unwrap();
        assert_eq!(table.column("pinyin"), Some(1));
        assert_eq!(table.column("missing"), None);
        assert_eq!(table.rows.len(), 1);
        assert!(table.require_column("hanviet").is_ok());
        let err = table.require_column("reading").unwrap_err();
        assert!(err.to_string().contains("missing column 'reading'"));
    }

    #[test]
    fn csv_table_empty_content() {
        assert!(matches!(CsvTable::parse(""), Err(SourceError::Parse(_))));
        assert!(matches!(
            CsvTable::parse("\n  \n"),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn csv_table_blank_records_dropped_after_parsing() {
        let table = CsvTable::parse("h1,h2\n\n , \n\"x\n\n\",y\n").unwrap();
        assert_eq!(table.rows, vec![vec!["x\n\n", "y"]]);
    }
}

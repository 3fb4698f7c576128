use hanviet_core::enrich::SentenceRecord;

use super::{field, CsvTable, SourceError};

const COL_CHARACTERS: &str = "Characters";
const COL_TRADITIONAL: &str = "Traditional";
const COL_PINYIN: &str = "Pinyin";
const COL_MEANING: &str = "Meaning";
const COL_HSK: &str = "HSK Level";
const COL_TOCFL: &str = "TOCFL Level";

#[derive(Debug, Clone, Default)]
pub struct SentenceFilter {
    /// Keep only rows whose TOCFL level equals this value.
    pub tocfl_level: Option<String>,
    /// Stop after this many kept rows.
    pub max_rows: Option<usize>,
}

/// Parse a sentence CSV into records ready for enrichment.
///
/// Returns the kept records and the number of data rows seen.
pub fn parse_sentences_csv(
    content: &str,
    filter: &SentenceFilter,
) -> Result<(Vec<SentenceRecord>, usize), SourceError> {
    let csv = CsvTable::parse(content)?;
    let characters = csv.require_column(COL_CHARACTERS)?;
    let traditional = csv.column(COL_TRADITIONAL);
    let pinyin = csv.column(COL_PINYIN);
    let meaning = csv.column(COL_MEANING);
    let hsk = csv.column(COL_HSK);
    let tocfl = csv.column(COL_TOCFL);

    let optional = |row: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| field(row, i)).unwrap_or_default().to_string()
    };

    let mut records = Vec::new();
    let mut seen = 0;
    for row in csv.rows.iter().map(Vec::as_slice) {
        if filter.max_rows.is_some_and(|max| records.len() >= max) {
            break;
        }
        seen += 1;
        let tocfl_level = optional(row, tocfl);
        if let Some(wanted) = &filter.tocfl_level {
            if &tocfl_level != wanted {
                continue;
            }
        }
        records.push(SentenceRecord {
            simplified_chinese: field(row, characters).unwrap_or_default().to_string(),
            traditional_chinese: optional(row, traditional),
            pinyin: optional(row, pinyin),
            english: optional(row, meaning),
            hsk_level: optional(row, hsk),
            tocfl_level,
            ..Default::default()
        });
    }
    Ok((records, seen))
}

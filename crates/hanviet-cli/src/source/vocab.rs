use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use hanviet_core::VocabRecord;

use super::SourceError;

/// A JSON vocabulary object viewed through its headword field.
pub struct JsonRecord<'a> {
    pub fields: &'a Map<String, Value>,
    pub headword_field: &'a str,
}

impl VocabRecord for JsonRecord<'_> {
    fn traditional_form(&self) -> Option<&str> {
        self.fields.get(self.headword_field)?.as_str()
    }
}

/// Parse a JSON array of vocabulary objects. Key order is preserved.
pub fn parse_vocab_json(content: &str) -> Result<Vec<Map<String, Value>>, SourceError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(SourceError::Parse(
            "vocabulary file must hold a JSON array".to_string(),
        ));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(SourceError::Parse(format!(
                "entry {} is not an object: {other}",
                i + 1
            ))),
        })
        .collect()
}

/// `dir/stem.json` becomes `dir/stem<suffix>.json`.
pub fn no_match_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}{suffix}.json"))
}

#[cfg(test)]
mod tests {
    use hanviet_core::{resolve_multiple, ReadingRow, ReadingTable};

    use super::*;

    #[test]
    fn parse_array_of_objects() {
        let items =
            parse_vocab_json(r#"[{"simplifiedChinese":"字","traditionalChinese":"字","id":1}]"#)
                .unwrap();
        assert_eq!(items.len(), 1);
        let keys: Vec<&str> = items[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["simplifiedChinese", "traditionalChinese", "id"]);
    }

    #[test]
    fn reject_non_array_and_non_object() {
        assert!(matches!(
            parse_vocab_json(r#"{"a":1}"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            parse_vocab_json(r#"[{"a":1}, 2]"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(parse_vocab_json("[oops"), Err(SourceError::Json(_))));
    }

    #[test]
    fn json_record_headword() {
        let table = ReadingTable::build(vec![ReadingRow::new("字", Some("zi4"), "tự")]);
        let items = parse_vocab_json(r#"[{"traditionalChinese":"字"},{"traditionalChinese":3},{}]"#)
            .unwrap();
        let resolved: Vec<Option<String>> = items
            .iter()
            .map(|fields| {
                let record = JsonRecord {
                    fields,
                    headword_field: "traditionalChinese",
                };
                resolve_multiple(&record, &table)
            })
            .collect();
        assert_eq!(resolved, vec![Some("tự".to_string()), None, None]);
    }

    #[test]
    fn no_match_file_name() {
        assert_eq!(
            no_match_path(Path::new("out/hsk1.json"), "_no_matches"),
            PathBuf::from("out/hsk1_no_matches.json")
        );
        assert_eq!(
            no_match_path(Path::new("hsk1"), "_missing"),
            PathBuf::from("hsk1_missing.json")
        );
    }
}

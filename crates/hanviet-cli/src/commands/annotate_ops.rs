use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use hanviet_core::resolve_multiple;
use hanviet_core::settings::{settings, VocabSettings};
use hanviet_core::ReadingTable;

use super::write_json;
use crate::source::{self, JsonRecord};

type Record = Map<String, Value>;

/// Set the reading field of every record. Returns copies of the records
/// that got no reading, in input order.
pub fn annotate_records(
    records: &mut [Record],
    table: &ReadingTable,
    fields: &VocabSettings,
) -> Vec<Record> {
    let mut unmatched = Vec::new();
    for (i, fields_map) in records.iter_mut().enumerate() {
        let record = JsonRecord {
            fields: fields_map,
            headword_field: &fields.traditional_field,
        };
        let reading = resolve_multiple(&record, table);

        let label = fields_map
            .get(&fields.simplified_field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match &reading {
            Some(r) => eprintln!("  {:3}. {label} → {r}", i + 1),
            None => eprintln!("  {:3}. {label} → (no match)", i + 1),
        }

        fields_map.insert(
            fields.output_field.clone(),
            Value::String(reading.clone().unwrap_or_default()),
        );
        if reading.is_none() {
            unmatched.push(fields_map.clone());
        }
    }
    unmatched
}

pub fn annotate(table_file: &str, vocab_file: &str, output_file: &str) {
    let table = die!(
        source::load_table(Path::new(table_file)),
        "Error loading table {table_file}: {}"
    );

    eprintln!("Reading {vocab_file}...");
    let content = die!(
        fs::read_to_string(vocab_file),
        "Error reading {vocab_file}: {}"
    );
    let mut records = die!(
        source::parse_vocab_json(&content),
        "Error parsing {vocab_file}: {}"
    );
    eprintln!("Annotating {} records...", records.len());

    let fields = &settings().vocab;
    let unmatched = annotate_records(&mut records, &table, fields);

    let output = Path::new(output_file);
    die!(
        write_json(output, &records),
        "Error writing {output_file}: {}"
    );
    let no_match = source::no_match_path(output, &fields.no_match_suffix);
    die!(
        write_json(&no_match, &unmatched),
        "Error writing {}: {}",
        no_match.display()
    );

    println!("Total:     {}", records.len());
    println!("Matched:   {}", records.len() - unmatched.len());
    println!("Unmatched: {}", unmatched.len());
    println!("Output:    {output_file}");
    println!("No match:  {}", no_match.display());
}

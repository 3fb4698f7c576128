use std::fs;
use std::path::Path;

use hanviet_core::enrich::{Enricher, SentenceRecord};
use hanviet_core::settings::settings;
use hanviet_core::ReadingTable;

use super::write_json;
use crate::source::{self, SentenceFilter};

/// Enrich `records`, keeping the ones that succeed. Failures are reported on
/// stderr and counted.
pub fn enrich_sentences(
    table: &ReadingTable,
    records: Vec<SentenceRecord>,
    batch_size: usize,
) -> (Vec<SentenceRecord>, usize) {
    let total = records.len();
    let results = Enricher::new(table).enrich_batch(records, batch_size);

    let mut enriched = Vec::with_capacity(total);
    let mut failed = 0;
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => enriched.push(record),
            Err(e) => {
                eprintln!("  row {}: {e}", i + 1);
                failed += 1;
            }
        }
        if (i + 1) % batch_size.max(1) == 0 || i + 1 == total {
            eprintln!("  processed {}/{total}", i + 1);
        }
    }
    (enriched, failed)
}

pub fn sentences(
    table_file: &str,
    input_csv: &str,
    output_file: &str,
    filter: &SentenceFilter,
) {
    let table = die!(
        source::load_table(Path::new(table_file)),
        "Error loading table {table_file}: {}"
    );

    eprintln!("Reading {input_csv}...");
    let content = die!(
        fs::read_to_string(input_csv),
        "Error reading {input_csv}: {}"
    );
    let (records, seen) = die!(
        source::parse_sentences_csv(&content, filter),
        "Error parsing {input_csv}: {}"
    );
    eprintln!("  (kept {} of {seen} rows)", records.len());

    let (enriched, failed) = enrich_sentences(&table, records, settings().enrich.batch_size);

    die!(
        write_json(Path::new(output_file), &enriched),
        "Error writing {output_file}: {}"
    );

    println!("Sentences: {}", enriched.len());
    println!("Failed:    {failed}");
    println!("Output:    {output_file}");
}

use std::fs;
use std::path::Path;

use hanviet_core::{resolve_multiple, resolve_preserving_layout, ReadingTable};

use crate::source;

const SAMPLE_KEYS: [&str; 4] = ["字", "行", "中國", "學生"];

fn load(file: &str) -> ReadingTable {
    die!(
        source::load_table(Path::new(file)),
        "Error loading table {file}: {}"
    )
}

pub fn info(file: &str) {
    let table = load(file);
    let file_size = fs::metadata(file).map(|m| m.len()).unwrap_or(0);
    let (unit_count, entry_count) = table.stats();

    println!("Reading table: {file}");
    println!("File size:  {:.1} KB", file_size as f64 / 1024.0);
    println!("Keys:       {unit_count}");
    println!("Entries:    {entry_count}");

    println!();
    println!("Sample lookups:");
    for key in &SAMPLE_KEYS {
        let readings = table.lookup_all_readings(key);
        if readings.is_empty() {
            println!("  {key} → (not found)");
        } else {
            println!("  {key} → {}", readings.join(", "));
        }
    }
}

pub fn compile(input_csv: &str, output_file: &str) {
    let table = load(input_csv);
    let (unit_count, entry_count) = table.stats();
    eprintln!("Compiling {unit_count} keys ({entry_count} entries)...");

    die!(
        table.save(Path::new(output_file)),
        "Error writing {output_file}: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({:.1} KB)",
        file_size as f64 / 1024.0
    );
}

pub fn lookup(file: &str, text: &str) {
    let table = load(file);
    print!("{}", describe(&table, text));
}

/// Every view of `text` the table offers, one per line.
pub fn describe(table: &ReadingTable, text: &str) -> String {
    let mut out = String::new();
    let best = resolve_multiple(text, table);
    out.push_str(&format!(
        "Reading:  {}\n",
        best.as_deref().unwrap_or("(not found)")
    ));
    out.push_str(&format!(
        "Layout:   {}\n",
        resolve_preserving_layout(text, table)
    ));

    let tagged = table.tagged_readings(text);
    if text.chars().count() == 1 && !tagged.is_empty() {
        out.push_str("Pronunciations:\n");
        for (pronunciation, reading) in tagged {
            out.push_str(&format!("  {pronunciation} → {reading}\n"));
        }
    }
    out
}

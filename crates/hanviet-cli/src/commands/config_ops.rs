use std::fs;

pub fn settings_export() {
    print!("{}", hanviet_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        hanviet_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: table.wildcard_fallback={:?}, vocab.output_field={}, enrich.batch_size={}",
        s.table.wildcard_fallback, s.vocab.output_field, s.enrich.batch_size
    );
}

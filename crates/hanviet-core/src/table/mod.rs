//! Sino-Vietnamese reading table.
//!
//! `ReadingTable` maps a written unit (a single character or a whole word)
//! plus an optional pronunciation tag to one reading string. Every character
//! that appears in the source gets a wildcard entry, either from a source row
//! without a pronunciation or synthesized from one of its tagged readings.

mod io;

use std::collections::HashMap;

use tracing::{debug, debug_span};

pub use io::{is_compiled, TableError};

/// Pronunciation literal that marks a wildcard row in source data.
pub const WILDCARD: &str = "*";

/// One record of the flat source data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingRow {
    pub character: String,
    pub pronunciation: Option<String>,
    pub reading: String,
}

impl ReadingRow {
    pub fn new(character: &str, pronunciation: Option<&str>, reading: &str) -> Self {
        Self {
            character: character.to_string(),
            pronunciation: pronunciation.map(str::to_string),
            reading: reading.to_string(),
        }
    }
}

/// How a wildcard entry is chosen for a character that only has
/// pronunciation-tagged rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WildcardFallback {
    /// Reading of the first tagged key recorded for the character.
    #[default]
    FirstInserted,
    /// Lexicographically smallest tagged reading.
    Smallest,
}

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub wildcard_fallback: WildcardFallback,
}

/// All entries recorded for one written unit.
#[derive(Debug, Clone, Default)]
struct Slot {
    wildcard: Option<String>,
    /// (pronunciation, reading) in first-seen key order.
    tagged: Vec<(String, String)>,
}

impl Slot {
    fn insert(&mut self, pronunciation: Option<&str>, reading: String) {
        match pronunciation {
            None => self.wildcard = Some(reading),
            Some(pron) => match self.tagged.iter_mut().find(|(p, _)| p == pron) {
                Some(existing) => existing.1 = reading,
                None => self.tagged.push((pron.to_string(), reading)),
            },
        }
    }

    fn fallback(&self, policy: WildcardFallback) -> Option<&str> {
        match policy {
            WildcardFallback::FirstInserted => self.tagged.first().map(|(_, r)| r.as_str()),
            WildcardFallback::Smallest => self.tagged.iter().map(|(_, r)| r.as_str()).min(),
        }
    }

    fn entry_count(&self) -> usize {
        self.tagged.len() + usize::from(self.wildcard.is_some())
    }
}

/// Immutable reading lookup table. Build once, then share by reference.
#[derive(Debug, Clone, Default)]
pub struct ReadingTable {
    slots: HashMap<String, Slot>,
    /// Written units in first-seen order.
    order: Vec<String>,
}

/// Normalize a pronunciation field: empty and `"*"` both mean wildcard.
fn pronunciation_tag(raw: Option<&str>) -> Option<&str> {
    match raw.map(str::trim) {
        None | Some("") | Some(WILDCARD) => None,
        Some(p) => Some(p),
    }
}

/// Strip the decoration left over when the reading field was a serialized
/// one-element list, e.g. `['tự']`.
pub fn clean_reading(raw: &str) -> String {
    raw.trim()
        .replace("['", "")
        .replace("']", "")
        .replace('\'', "")
        .trim()
        .to_string()
}

impl ReadingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with the default options. Malformed rows are skipped.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ReadingRow>,
    {
        Self::build_with(rows, &TableOptions::default())
    }

    pub fn build_with<I>(rows: I, options: &TableOptions) -> Self
    where
        I: IntoIterator<Item = ReadingRow>,
    {
        let _span = debug_span!("table_build").entered();
        let mut table = Self::new();
        let mut total = 0usize;
        let mut skipped = 0usize;

        for row in rows {
            total += 1;
            let character = row.character.trim();
            let reading = clean_reading(&row.reading);
            if character.is_empty() || reading.is_empty() {
                skipped += 1;
                continue;
            }
            table.insert(
                character,
                pronunciation_tag(row.pronunciation.as_deref()),
                reading,
            );
        }

        let synthesized = table.synthesize_wildcards(options.wildcard_fallback);
        debug!(total, skipped, synthesized, keys = table.order.len());
        table
    }

    fn insert(&mut self, character: &str, pronunciation: Option<&str>, reading: String) {
        if !self.slots.contains_key(character) {
            self.order.push(character.to_string());
        }
        self.slots
            .entry(character.to_string())
            .or_default()
            .insert(pronunciation, reading);
    }

    /// Give every unit without a wildcard entry one derived from its tagged
    /// readings. Returns the number of entries added.
    fn synthesize_wildcards(&mut self, policy: WildcardFallback) -> usize {
        let mut added = 0;
        for slot in self.slots.values_mut() {
            if slot.wildcard.is_some() {
                continue;
            }
            if let Some(reading) = slot.fallback(policy).map(str::to_string) {
                slot.wildcard = Some(reading);
                added += 1;
            }
        }
        added
    }

    /// Exact key lookup. `None` as pronunciation (or `"*"`) selects the
    /// wildcard entry.
    pub fn lookup_exact(&self, text: &str, pronunciation: Option<&str>) -> Option<&str> {
        let slot = self.slots.get(text)?;
        match pronunciation_tag(pronunciation) {
            None => slot.wildcard.as_deref(),
            Some(pron) => slot
                .tagged
                .iter()
                .find(|(p, _)| p == pron)
                .map(|(_, r)| r.as_str()),
        }
    }

    /// Wildcard reading of `text`.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.lookup_exact(text, None)
    }

    /// Every distinct pronunciation-tagged reading of `text`, first-seen order.
    pub fn lookup_all_readings(&self, text: &str) -> Vec<&str> {
        let Some(slot) = self.slots.get(text) else {
            return Vec::new();
        };
        let mut readings: Vec<&str> = Vec::with_capacity(slot.tagged.len());
        for (_, reading) in &slot.tagged {
            if !readings.contains(&reading.as_str()) {
                readings.push(reading);
            }
        }
        readings
    }

    /// (pronunciation, reading) pairs of `text`, first-seen order.
    pub fn tagged_readings(&self, text: &str) -> &[(String, String)] {
        self.slots
            .get(text)
            .map(|slot| slot.tagged.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.slots.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// (unit count, entry count), wildcard entries included.
    pub fn stats(&self) -> (usize, usize) {
        let entries = self.slots.values().map(Slot::entry_count).sum();
        (self.order.len(), entries)
    }

    /// Iterate every entry as `(text, pronunciation, reading)` in insertion
    /// order; wildcard entries come first for each unit.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>, &str)> + '_ {
        self.order
            .iter()
            .filter_map(|text| {
                let slot = self.slots.get(text)?;
                let wildcard = slot.wildcard.as_deref().map(|r| (text.as_str(), None, r));
                let tagged = slot
                    .tagged
                    .iter()
                    .map(move |(p, r)| (text.as_str(), Some(p.as_str()), r.as_str()));
                Some(wildcard.into_iter().chain(tagged))
            })
            .flatten()
    }
}

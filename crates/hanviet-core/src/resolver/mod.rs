//! Reading resolution for vocabulary records and free text.
//!
//! Two entry points cover the two callers:
//! - [`resolve_multiple`] annotates a dictionary headword. A lone character
//!   surfaces all its readings (`tự/chữ`); longer words try a whole-word
//!   entry, then fall back to per-character readings.
//! - [`resolve_preserving_layout`] transliterates a sentence, keeping
//!   punctuation and Latin runs in place.
//!
//! Missing readings never fail: they render as `_` or make the whole result
//! `None`.


use tracing::{debug, debug_span};

use crate::compose::{compose, ResolvedPart, PLACEHOLDER};
use crate::table::ReadingTable;
use crate::unicode::{clean, has_non_chinese, is_hanzi, segment, ClassifiedUnit};

/// Separator between alternative readings of a single character.
pub const ALTERNATIVE_SEPARATOR: &str = "/";

/// A vocabulary record that carries a traditional-form headword.
pub trait VocabRecord {
    fn traditional_form(&self) -> Option<&str>;
}

impl VocabRecord for str {
    fn traditional_form(&self) -> Option<&str> {
        Some(self)
    }
}

impl VocabRecord for String {
    fn traditional_form(&self) -> Option<&str> {
        Some(self)
    }
}

fn char_reading(table: &ReadingTable, c: char) -> Option<&str> {
    let mut buf = [0u8; 4];
    table.lookup(c.encode_utf8(&mut buf))
}

/// Whole-word lookup on already cleaned text.
fn whole_word<'t>(cleaned: &str, table: &'t ReadingTable) -> Option<&'t str> {
    if cleaned.chars().nth(1).is_none() || has_non_chinese(cleaned) {
        return None;
    }
    table.lookup(cleaned)
}

/// Wildcard reading of the whole cleaned word, if it is a multi-character,
/// all-Chinese entry of the table.
pub fn resolve_whole(text: &str, table: &ReadingTable) -> Option<String> {
    whole_word(&clean(text), table).map(str::to_string)
}

/// Reading of one vocabulary headword.
///
/// Returns `None` when the headword is empty after cleaning or when no
/// character of it has a reading.
pub fn resolve_multiple<R>(entry: &R, table: &ReadingTable) -> Option<String>
where
    R: VocabRecord + ?Sized,
{
    let cleaned = clean(entry.traditional_form()?);
    if cleaned.is_empty() {
        return None;
    }
    let _span = debug_span!("resolve_multiple", text = cleaned.as_str()).entered();

    let mut chars = cleaned.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // Alternatives only for the unified ideograph block; any other single
        // character falls through to its wildcard reading.
        if is_hanzi(c) {
            let readings = table.lookup_all_readings(&cleaned);
            if !readings.is_empty() {
                debug!(alternatives = readings.len());
                return Some(readings.join(ALTERNATIVE_SEPARATOR));
            }
        }
    }

    if let Some(reading) = whole_word(&cleaned, table) {
        debug!("whole-word entry");
        return Some(reading.to_string());
    }

    let readings: Vec<&str> = cleaned
        .chars()
        .map(|c| char_reading(table, c).unwrap_or(PLACEHOLDER))
        .collect();
    if readings.iter().all(|r| *r == PLACEHOLDER) {
        debug!("no reading for any character");
        return None;
    }
    Some(readings.join(" "))
}

/// Resolve every classified unit of cleaned text. Chinese characters take
/// their wildcard reading or the placeholder; everything else is verbatim.
pub fn resolve_parts(cleaned: &str, table: &ReadingTable) -> Vec<ResolvedPart> {
    segment(cleaned)
        .into_iter()
        .map(|unit| match unit {
            ClassifiedUnit::Chinese(c) => ResolvedPart::chinese(c, char_reading(table, c)),
            other => ResolvedPart::verbatim(other),
        })
        .collect()
}

/// Transliterate `text`, keeping punctuation and Latin runs inline.
pub fn resolve_preserving_layout(text: &str, table: &ReadingTable) -> String {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return String::new();
    }
    let _span = debug_span!("resolve_preserving_layout", text = cleaned.as_str()).entered();

    if let Some(reading) = whole_word(&cleaned, table) {
        debug!("whole-word entry");
        return reading.to_string();
    }

    let parts = resolve_parts(&cleaned, table);
    debug!(parts = parts.len());
    compose(&parts)
}

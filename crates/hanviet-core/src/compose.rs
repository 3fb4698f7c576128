//! Reassembles resolved parts into one transliteration line.

use crate::unicode::{is_cjk_punctuation, ClassifiedUnit};

/// Rendered text of a Chinese character with no reading.
pub const PLACEHOLDER: &str = "_";

/// A classified unit with its rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPart {
    pub unit: ClassifiedUnit,
    pub text: String,
}

impl ResolvedPart {
    /// Chinese character rendered as `reading`, or the placeholder when `None`.
    pub fn chinese(c: char, reading: Option<&str>) -> Self {
        Self {
            unit: ClassifiedUnit::Chinese(c),
            text: reading.unwrap_or(PLACEHOLDER).to_string(),
        }
    }

    /// Punctuation or Latin run, rendered verbatim.
    pub fn verbatim(unit: ClassifiedUnit) -> Self {
        let text = match &unit {
            ClassifiedUnit::Chinese(c) | ClassifiedUnit::Punctuation(c) => c.to_string(),
            ClassifiedUnit::LatinRun(run) => run.clone(),
        };
        Self { unit, text }
    }

    pub fn is_non_chinese(&self) -> bool {
        !matches!(self.unit, ClassifiedUnit::Chinese(_))
    }

    pub fn is_latin_or_numeral(&self) -> bool {
        matches!(self.unit, ClassifiedUnit::LatinRun(_))
    }

    /// A Chinese character that actually got a reading.
    fn is_reading(&self) -> bool {
        !self.is_non_chinese() && self.text != PLACEHOLDER
    }

    /// Punctuation after which a Latin run gets a separating space.
    fn separates_latin(&self) -> bool {
        match self.unit {
            ClassifiedUnit::Punctuation(c) => !is_cjk_punctuation(c) && !c.is_whitespace(),
            _ => false,
        }
    }
}

/// Whether a single space goes between `prev` and `cur`.
fn space_between(prev: &ResolvedPart, cur: &ResolvedPart) -> bool {
    (prev.is_reading() && cur.is_reading())
        || (prev.is_reading() && cur.is_latin_or_numeral())
        || (prev.is_latin_or_numeral() && cur.is_reading())
        || (prev.separates_latin() && cur.is_latin_or_numeral())
}

/// Concatenate part texts, inserting at most one space before each part.
///
/// Spaces separate adjacent readings and set Latin runs apart from readings
/// and from ASCII punctuation. Nothing is inserted after CJK punctuation,
/// next to whitespace, or around placeholders.
pub fn compose(parts: &[ResolvedPart]) -> String {
    let capacity = parts.iter().map(|p| p.text.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 && space_between(&parts[i - 1], part) {
            out.push(' ');
        }
        out.push_str(&part.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClassifiedUnit::*;

    fn reading(c: char, r: &str) -> ResolvedPart {
        ResolvedPart::chinese(c, Some(r))
    }

    fn missing(c: char) -> ResolvedPart {
        ResolvedPart::chinese(c, None)
    }

    fn punct(c: char) -> ResolvedPart {
        ResolvedPart::verbatim(Punctuation(c))
    }

    fn latin(s: &str) -> ResolvedPart {
        ResolvedPart::verbatim(LatinRun(s.to_string()))
    }

    #[test]
    fn readings_are_space_separated() {
        let parts = [reading('你', "nễ"), reading('好', "hảo")];
        assert_eq!(compose(&parts), "nễ hảo");
    }

    #[test]
    fn placeholder_gets_no_spacing() {
        let parts = [reading('你', "nễ"), missing('㐀'), reading('好', "hảo")];
        assert_eq!(compose(&parts), "nễ_hảo");
        assert_eq!(compose(&[missing('甲'), missing('乙')]), "__");
    }

    #[test]
    fn latin_run_between_readings() {
        let parts = [reading('買', "mãi"), latin("iPhone"), reading('了', "liễu")];
        assert_eq!(compose(&parts), "mãi iPhone liễu");
    }

    #[test]
    fn latin_after_placeholder_not_spaced() {
        assert_eq!(compose(&[missing('甲'), latin("A")]), "_A");
        assert_eq!(compose(&[latin("A"), missing('甲')]), "A_");
    }

    #[test]
    fn no_space_after_cjk_punctuation() {
        let parts = [reading('好', "hảo"), punct('，'), latin("OK")];
        assert_eq!(compose(&parts), "hảo，OK");
    }

    #[test]
    fn space_after_ascii_punctuation() {
        let parts = [latin("a"), punct(','), latin("b")];
        assert_eq!(compose(&parts), "a, b");
    }

    #[test]
    fn ascii_double_quote_counts_as_cjk_punctuation() {
        let parts = [punct('"'), latin("hi"), punct('"')];
        assert_eq!(compose(&parts), "\"hi\"");
    }

    #[test]
    fn existing_whitespace_not_doubled() {
        let parts = [
            reading('我', "ngã"),
            punct(' '),
            latin("love"),
            punct(' '),
            reading('你', "nễ"),
            punct('。'),
        ];
        assert_eq!(compose(&parts), "ngã love nễ。");
    }

    #[test]
    fn punctuation_pairs_untouched() {
        let parts = [reading('好', "hảo"), punct('！'), punct('？'), reading('嗎', "ma")];
        assert_eq!(compose(&parts), "hảo！？ma");
    }

    #[test]
    fn empty_parts() {
        assert_eq!(compose(&[]), "");
    }

    #[test]
    fn part_flags() {
        assert!(latin("x").is_non_chinese());
        assert!(latin("x").is_latin_or_numeral());
        assert!(punct('。').is_non_chinese());
        assert!(!punct('。').is_latin_or_numeral());
        assert!(!reading('字', "tự").is_non_chinese());
        assert!(!missing('字').is_reading());
    }
}

//! Character-level classification and cleaning for Chinese vocabulary text.

/// CJK and general punctuation that is always treated as punctuation, even
/// when the character is ASCII (the plain double quote).
pub const CJK_PUNCTUATION: &str = "，。！？；：、\"\"（）【】《》〈〉「」『』〔〕…—–·～";

/// Alternate-form delimiters, applied in this order.
const ALTERNATE_DELIMITERS: [char; 2] = ['｜', '|'];

/// Exclusive character classes, decided by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Chinese,
    Punctuation,
    LatinOrNumeral,
}

/// CJK Unified Ideographs block only (U+4E00..U+9FFF). Extension-block
/// ideographs classify as punctuation.
pub fn is_hanzi(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn is_cjk_punctuation(c: char) -> bool {
    CJK_PUNCTUATION.contains(c)
}

/// ASCII letters and digits, the only characters that join a Latin run.
pub fn is_latin_or_numeral(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Classify a single character. The checks run in a fixed order, so the ASCII
/// double quote is punctuation while other ASCII symbols and whitespace fall
/// into `LatinOrNumeral`.
pub fn classify(c: char) -> CharClass {
    if is_hanzi(c) {
        CharClass::Chinese
    } else if is_cjk_punctuation(c) {
        CharClass::Punctuation
    } else if c.is_ascii_alphanumeric() || c.is_whitespace() || c.is_ascii() {
        CharClass::LatinOrNumeral
    } else {
        CharClass::Punctuation
    }
}

/// One classified unit of cleaned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedUnit {
    Chinese(char),
    Punctuation(char),
    /// Maximal run of ASCII letters and digits.
    LatinRun(String),
}

/// Split `text` into classified units, merging consecutive ASCII
/// alphanumerics into one `LatinRun`. Every other non-Chinese character,
/// whitespace and ASCII symbols included, becomes its own `Punctuation` unit.
pub fn segment(text: &str) -> Vec<ClassifiedUnit> {
    let mut units = Vec::new();
    let mut run = String::new();

    for c in text.chars() {
        let class = classify(c);
        if class == CharClass::LatinOrNumeral && is_latin_or_numeral(c) {
            run.push(c);
            continue;
        }
        if !run.is_empty() {
            units.push(ClassifiedUnit::LatinRun(std::mem::take(&mut run)));
        }
        units.push(match class {
            CharClass::Chinese => ClassifiedUnit::Chinese(c),
            _ => ClassifiedUnit::Punctuation(c),
        });
    }
    if !run.is_empty() {
        units.push(ClassifiedUnit::LatinRun(run));
    }
    units
}

/// True if any character of `text` is not Chinese.
pub fn has_non_chinese(text: &str) -> bool {
    text.chars().any(|c| classify(c) != CharClass::Chinese)
}

/// Strip dictionary annotations from vocabulary text.
///
/// Keeps everything before the first alternate-form delimiter (`｜`, then `|`),
/// removes parenthesised notes in either full-width or ASCII parentheses, and
/// trims surrounding whitespace.
pub fn clean(text: &str) -> String {
    let mut head = text;
    for delim in ALTERNATE_DELIMITERS {
        if let Some((before, _)) = head.split_once(delim) {
            head = before;
        }
    }
    strip_parentheticals(head).trim().to_string()
}

fn is_open_paren(c: char) -> bool {
    c == '（' || c == '('
}

fn is_close_paren(c: char) -> bool {
    c == '）' || c == ')'
}

/// Remove every `open .. close` span, matching the nearest closing bracket of
/// either width. An opening bracket with no closing bracket is kept verbatim.
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(is_open_paren) {
        let after_open = &rest[open..];
        let open_len = after_open.chars().next().map_or(0, char::len_utf8);
        match after_open[open_len..].find(is_close_paren) {
            Some(close) => {
                out.push_str(&rest[..open]);
                let close_at = open + open_len + close;
                let close_len = rest[close_at..].chars().next().map_or(0, char::len_utf8);
                rest = &rest[close_at + close_len..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_order() {
        assert_eq!(classify('字'), CharClass::Chinese);
        assert_eq!(classify('一'), CharClass::Chinese);
        assert_eq!(classify('\u{9FFF}'), CharClass::Chinese);
        assert_eq!(classify('。'), CharClass::Punctuation);
        assert_eq!(classify('"'), CharClass::Punctuation);
        assert_eq!(classify('a'), CharClass::LatinOrNumeral);
        assert_eq!(classify('7'), CharClass::LatinOrNumeral);
        assert_eq!(classify(','), CharClass::LatinOrNumeral);
        assert_eq!(classify(' '), CharClass::LatinOrNumeral);
        assert_eq!(classify('\u{3000}'), CharClass::LatinOrNumeral);
        assert_eq!(classify('あ'), CharClass::Punctuation);
        assert_eq!(classify('é'), CharClass::Punctuation);
        assert_eq!(classify('\u{3400}'), CharClass::Punctuation);
    }

    #[test]
    fn test_clean_annotations() {
        assert_eq!(clean("你好（test）"), "你好");
        assert_eq!(clean("你好｜妳好"), "你好");
        assert_eq!(clean("你好|妳好"), "你好");
        assert_eq!(clean("一(yī)下（xià）"), "一下");
        assert_eq!(clean("  我們 "), "我們");
        assert_eq!(clean("（note）"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_clean_mixed_brackets() {
        assert_eq!(clean("字(zì）典"), "字典");
        assert_eq!(clean("字（zì)典"), "字典");
        assert_eq!(clean("字（未閉"), "字（未閉");
    }

    #[test]
    fn test_clean_delimiters_before_parentheses() {
        assert_eq!(clean("甲（乙｜丙）"), "甲（乙");
        assert_eq!(clean("甲｜乙|丙"), "甲");
    }

    #[test]
    fn test_segment_groups_latin_runs() {
        use ClassifiedUnit::*;
        assert_eq!(
            segment("我 love 你。"),
            vec![
                Chinese('我'),
                Punctuation(' '),
                LatinRun("love".into()),
                Punctuation(' '),
                Chinese('你'),
                Punctuation('。'),
            ]
        );
        assert_eq!(
            segment("A4紙,x2"),
            vec![
                LatinRun("A4".into()),
                Chinese('紙'),
                Punctuation(','),
                LatinRun("x2".into()),
            ]
        );
        assert_eq!(
            segment("ab\"cd"),
            vec![LatinRun("ab".into()), Punctuation('"'), LatinRun("cd".into())]
        );
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_has_non_chinese() {
        assert!(!has_non_chinese("你好"));
        assert!(has_non_chinese("你好!"));
        assert!(has_non_chinese("A你"));
        assert!(!has_non_chinese(""));
    }
}

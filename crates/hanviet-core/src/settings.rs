//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! Only the file-facing layers read these. The reading table takes its
//! options explicitly through [`TableSettings::options`].

use std::sync::OnceLock;

use serde::Deserialize;

use crate::table::{TableOptions, WildcardFallback};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub table: TableSettings,
    pub source: SourceSettings,
    pub vocab: VocabSettings,
    pub enrich: EnrichSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackSetting {
    FirstInserted,
    Smallest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub wildcard_fallback: FallbackSetting,
}

impl TableSettings {
    pub fn options(&self) -> TableOptions {
        let wildcard_fallback = match self.wildcard_fallback {
            FallbackSetting::FirstInserted => WildcardFallback::FirstInserted,
            FallbackSetting::Smallest => WildcardFallback::Smallest,
        };
        TableOptions { wildcard_fallback }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub char_column: String,
    pub pronunciation_column: String,
    pub reading_column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabSettings {
    pub traditional_field: String,
    pub simplified_field: String,
    pub output_field: String,
    pub no_match_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichSettings {
    pub batch_size: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(source.char_column);
    check_non_empty!(source.pronunciation_column);
    check_non_empty!(source.reading_column);

    check_non_empty!(vocab.traditional_field);
    check_non_empty!(vocab.simplified_field);
    check_non_empty!(vocab.output_field);
    check_non_empty!(vocab.no_match_suffix);

    if s.enrich.batch_size == 0 {
        return Err(SettingsError::InvalidValue {
            field: "enrich.batch_size".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"
[table]
wildcard_fallback = "smallest"

[source]
char_column = "character"
pronunciation_column = "pinyin"
reading_column = "reading"

[vocab]
traditional_field = "trad"
simplified_field = "simp"
output_field = "hv"
no_match_suffix = "_missing"

[enrich]
batch_size = 8
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.table.wildcard_fallback, FallbackSetting::FirstInserted);
        assert_eq!(
            s.table.options().wildcard_fallback,
            WildcardFallback::FirstInserted
        );
        assert_eq!(s.source.char_column, "char");
        assert_eq!(s.source.pronunciation_column, "pinyin");
        assert_eq!(s.source.reading_column, "hanviet");
        assert_eq!(s.vocab.traditional_field, "traditionalChinese");
        assert_eq!(s.vocab.output_field, "hanviet");
        assert_eq!(s.vocab.no_match_suffix, "_no_matches");
        assert_eq!(s.enrich.batch_size, 5);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(CUSTOM).unwrap();
        assert_eq!(s.table.options().wildcard_fallback, WildcardFallback::Smallest);
        assert_eq!(s.source.reading_column, "reading");
        assert_eq!(s.vocab.output_field, "hv");
        assert_eq!(s.enrich.batch_size, 8);
    }

    #[test]
    fn error_zero_batch_size() {
        let toml = CUSTOM.replace("batch_size = 8", "batch_size = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("enrich.batch_size"));
    }

    #[test]
    fn error_empty_field_name() {
        let toml = CUSTOM.replace("output_field = \"hv\"", "output_field = \" \"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("vocab.output_field"));
    }

    #[test]
    fn error_unknown_fallback() {
        let toml = CUSTOM.replace("\"smallest\"", "\"random\"");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn error_missing_section() {
        assert!(matches!(
            parse_settings_toml("[table]\nwildcard_fallback = \"smallest\"\n"),
            Err(SettingsError::Parse(_))
        ));
    }
}

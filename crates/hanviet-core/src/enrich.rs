//! Sentence enrichment around the reading resolver.
//!
//! Translation and romanization are external services; they plug in through
//! [`Translator`] and [`Romanizer`]. A failing service fails only the record
//! being enriched, so callers decide whether to abort a batch or skip ahead.

use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::resolver::{resolve_preserving_layout, VocabRecord};
use crate::table::ReadingTable;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("translation to {target} failed: {message}")]
    Translation { target: &'static str, message: String },

    #[error("romanization failed: {0}")]
    Romanization(String),

    #[error("enrichment worker panicked")]
    WorkerPanicked,
}

/// Languages the translation service is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    SimplifiedChinese,
    TraditionalChinese,
    Vietnamese,
    English,
    Cantonese,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::SimplifiedChinese => "zh-CN",
            Lang::TraditionalChinese => "zh-TW",
            Lang::Vietnamese => "vi",
            Lang::English => "en",
            Lang::Cantonese => "yue",
        }
    }
}

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String, ServiceError>;
}

/// Pinyin or Jyutping romanization.
pub trait Romanizer: Send + Sync {
    fn romanize(&self, text: &str) -> Result<String, ServiceError>;
}

/// One sentence of a learning dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRecord {
    #[serde(default)]
    pub traditional_chinese: String,
    #[serde(default)]
    pub simplified_chinese: String,
    #[serde(default)]
    pub written_cantonese: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub jyutping: String,
    #[serde(default)]
    pub cantonese_jyutping: String,
    #[serde(default)]
    pub hanviet: String,
    #[serde(default)]
    pub viet: String,
    #[serde(default)]
    pub english: String,
    #[serde(default, rename = "hsk_level")]
    pub hsk_level: String,
    #[serde(default, rename = "tocfl_level")]
    pub tocfl_level: String,
}

impl VocabRecord for SentenceRecord {
    fn traditional_form(&self) -> Option<&str> {
        Some(self.traditional_chinese.as_str()).filter(|s| !s.is_empty())
    }
}

/// Fills the derived fields of sentence records.
#[derive(Clone, Copy)]
pub struct Enricher<'a> {
    table: &'a ReadingTable,
    romanizer: Option<&'a dyn Romanizer>,
    translator: Option<&'a dyn Translator>,
}

impl<'a> Enricher<'a> {
    pub fn new(table: &'a ReadingTable) -> Self {
        Self {
            table,
            romanizer: None,
            translator: None,
        }
    }

    pub fn with_romanizer(mut self, romanizer: &'a dyn Romanizer) -> Self {
        self.romanizer = Some(romanizer);
        self
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    fn translate(&self, text: &str, target: Lang) -> Result<Option<String>, ServiceError> {
        match self.translator {
            Some(t) => t
                .translate(text, Lang::TraditionalChinese, target)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Enrich one record. Fields the available services cannot produce are
    /// left as they are.
    pub fn enrich(&self, mut record: SentenceRecord) -> Result<SentenceRecord, ServiceError> {
        if record.traditional_chinese.is_empty() {
            record.traditional_chinese = match self.translator {
                Some(t) => t.translate(
                    &record.simplified_chinese,
                    Lang::SimplifiedChinese,
                    Lang::TraditionalChinese,
                )?,
                None => record.simplified_chinese.clone(),
            };
        }

        let traditional = record.traditional_chinese.clone();
        record.hanviet = resolve_preserving_layout(&traditional, self.table);

        if let Some(r) = self.romanizer {
            record.jyutping = r.romanize(&traditional)?;
        }

        if let Some(viet) = self.translate(&traditional, Lang::Vietnamese)? {
            record.viet = viet;
        }
        if record.english.is_empty() {
            if let Some(english) = self.translate(&traditional, Lang::English)? {
                record.english = english;
            }
        }
        if let Some(cantonese) = self.translate(&traditional, Lang::Cantonese)? {
            record.written_cantonese = cantonese;
        }

        if let Some(r) = self.romanizer {
            if !record.written_cantonese.is_empty() {
                record.cantonese_jyutping = r.romanize(&record.written_cantonese)?;
            }
        }

        Ok(record)
    }

    /// Enrich records in batches of `batch_size`. Records of one batch run
    /// concurrently; results keep input order.
    pub fn enrich_batch(
        &self,
        records: Vec<SentenceRecord>,
        batch_size: usize,
    ) -> Vec<Result<SentenceRecord, ServiceError>> {
        let batch_size = batch_size.max(1);
        let total_batches = records.len().div_ceil(batch_size);
        let mut results = Vec::with_capacity(records.len());
        let mut pending = records.into_iter();

        for batch_num in 0..total_batches {
            let batch: Vec<SentenceRecord> = pending.by_ref().take(batch_size).collect();
            let _span = debug_span!(
                "enrich_batch",
                batch = batch_num + 1,
                total_batches,
                len = batch.len()
            )
            .entered();

            let enricher = *self;
            let batch_results: Vec<_> = thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .into_iter()
                    .map(|record| scope.spawn(move || enricher.enrich(record)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or(Err(ServiceError::WorkerPanicked)))
                    .collect()
            });

            let failed = batch_results.iter().filter(|r| r.is_err()).count();
            debug!(failed);
            results.extend(batch_results);
        }
        results
    }
}

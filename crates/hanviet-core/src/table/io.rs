use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ReadingTable;

pub const MAGIC: &[u8; 4] = b"HVTB";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected HVTB)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Flat serialization record. `pronunciation == None` is a wildcard entry,
/// synthesized ones included, so loading skips the synthesis step.
#[derive(Serialize, Deserialize)]
struct EntryRecord {
    text: String,
    pronunciation: Option<String>,
    reading: String,
}

impl ReadingTable {
    /// Serialize to bytes (HVTB format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        let records: Vec<EntryRecord> = self
            .iter()
            .map(|(text, pronunciation, reading)| EntryRecord {
                text: text.to_string(),
                pronunciation: pronunciation.map(str::to_string),
                reading: reading.to_string(),
            })
            .collect();

        let body = bincode::serialize(&records).map_err(TableError::Serialize)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (HVTB format).
    pub fn from_bytes(data: &[u8]) -> Result<Self, TableError> {
        if data.len() < HEADER_SIZE {
            return Err(TableError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(TableError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(TableError::UnsupportedVersion(data[4]));
        }
        let records: Vec<EntryRecord> =
            bincode::deserialize(&data[HEADER_SIZE..]).map_err(TableError::Deserialize)?;

        let mut table = ReadingTable::new();
        for rec in records {
            table.insert(&rec.text, rec.pronunciation.as_deref(), rec.reading);
        }
        Ok(table)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn open(path: &Path) -> Result<Self, TableError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }
}

/// True if `data` starts with the compiled-table magic bytes.
pub fn is_compiled(data: &[u8]) -> bool {
    data.len() >= MAGIC.len() && &data[..MAGIC.len()] == MAGIC
}

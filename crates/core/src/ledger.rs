//! Append-only JSONL ledger of finished matches, chained with SHA-256.
//!
//! - Line 1: header with `format_version` and `created_by`.
//! - Lines 2+: one record per finished match (`seq`, `arena`, `seed`,
//!   `episodes`, `scores`) plus `prev_sha256_hex` and `sha256_hex`.
//!
//! Every append is flushed at once. Loading validates each line and the hash
//! chain, stopping at the first invalid or incomplete line.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const LEDGER_FORMAT_VERSION: u16 = 1;

/// The previous-hash of the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Outcome of one finished match.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub arena: String,
    pub seed: u64,
    pub episodes: u64,
    pub scores: BTreeMap<String, u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    created_by: String,
}

/// Hash input: serialized to JSON and concatenated with `prev_sha256_hex`.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    #[serde(flatten)]
    record: &'a MatchRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    #[serde(flatten)]
    record: MatchRecord,
    prev_sha256_hex: String,
    sha256_hex: String,
}

impl RecordBody<'_> {
    /// `hex(SHA-256(body_json || prev_sha256_hex))`.
    fn chained_sha256(&self, prev_sha256_hex: &str) -> serde_json::Result<String> {
        let body_json = serde_json::to_string(self)?;
        let digest = Sha256::new()
            .chain_update(body_json.as_bytes())
            .chain_update(prev_sha256_hex.as_bytes())
            .finalize();
        Ok(format!("{digest:064x}"))
    }
}

fn write_json_line<T: Serialize>(writer: &mut BufWriter<File>, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

pub struct LedgerWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl LedgerWriter {
    /// Creates (or truncates) a ledger file and writes the header line.
    pub fn create(path: &Path, created_by: &str) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        let header = FileHeader { format_version: LEDGER_FORMAT_VERSION, created_by: created_by.to_string() };
        write_json_line(&mut writer, &header)?;
        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    /// Continues the chain of a ledger previously read with [`load_ledger`].
    pub fn resume(path: &Path, loaded: &LoadedLedger) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_sha256_hex: loaded.last_sha256_hex.clone(),
            next_seq: loaded.next_seq,
        })
    }

    /// Opens an existing ledger for appending, or creates a fresh one.
    pub fn open_or_create(path: &Path, created_by: &str) -> Result<Self, LedgerError> {
        if !path.exists() {
            return Ok(Self::create(path, created_by)?);
        }
        let loaded = load_ledger(path)?;
        Ok(Self::resume(path, &loaded)?)
    }

    /// Appends one match record and flushes. Returns its sequence number.
    pub fn append(&mut self, record: &MatchRecord) -> io::Result<u64> {
        let seq = self.next_seq;
        let sha256_hex =
            RecordBody { seq, record }.chained_sha256(&self.last_sha256_hex).map_err(io::Error::other)?;
        let line = FileRecord {
            seq,
            record: record.clone(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex,
        };
        write_json_line(&mut self.writer, &line)?;

        self.last_sha256_hex = line.sha256_hex;
        self.next_seq += 1;
        Ok(seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub seq: u64,
    pub record: MatchRecord,
}

#[derive(Debug)]
pub struct LoadedLedger {
    pub format_version: u16,
    pub created_by: String,
    pub entries: Vec<LedgerEntry>,
    /// SHA-256 hex of the last valid record, or the initial hash if there is none.
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

impl LoadedLedger {
    /// Sums every controller's scores across all recorded matches.
    pub fn totals(&self) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for entry in &self.entries {
            for (name, score) in &entry.record.scores {
                *totals.entry(name.clone()).or_insert(0) += u64::from(*score);
            }
        }
        totals
    }

    /// Checks one record line against the chain so far and keeps it.
    fn accept(&mut self, line: usize, text: &str) -> Result<(), LedgerError> {
        let invalid = |message: String| LedgerError::InvalidRecord { line, message };
        let stored: FileRecord = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
        if stored.seq != self.next_seq {
            return Err(invalid(format!("expected seq {}, found {}", self.next_seq, stored.seq)));
        }

        let recomputed = RecordBody { seq: stored.seq, record: &stored.record }
            .chained_sha256(&self.last_sha256_hex)
            .map_err(|e| invalid(e.to_string()))?;
        if stored.prev_sha256_hex != self.last_sha256_hex || stored.sha256_hex != recomputed {
            return Err(LedgerError::HashChainBroken { line });
        }

        self.last_sha256_hex = stored.sha256_hex;
        self.next_seq += 1;
        self.entries.push(LedgerEntry { seq: stored.seq, record: stored.record });
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("ledger file is empty")]
    EmptyFile,
    #[error("invalid ledger header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid ledger record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("incomplete ledger line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

pub fn load_ledger(path: &Path) -> Result<LoadedLedger, LedgerError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().zip(1..);
    let Some((header_line, _)) = lines.next() else {
        return Err(LedgerError::EmptyFile);
    };
    if !content.ends_with('\n') {
        return Err(LedgerError::IncompleteLine { line: content.lines().count() });
    }

    let header: FileHeader = serde_json::from_str(header_line)
        .map_err(|e| LedgerError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut ledger = LoadedLedger {
        format_version: header.format_version,
        created_by: header.created_by,
        entries: Vec::new(),
        last_sha256_hex: INITIAL_HASH.to_string(),
        next_seq: 0,
    };
    for (text, line) in lines {
        ledger.accept(line, text)?;
    }
    Ok(ledger)
}

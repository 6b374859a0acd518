use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::CombatEvent;
use crate::combination::CombinationResult;

/// Everything that happened in one combat turn, one JSON object per line.
/// Together with `seed` this is enough to replay the turn.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// `YYYYMMDD-NNNNNN`
    pub turn_id: String,
    /// Seed of the session's random source, when it was seeded
    pub seed: Option<u64>,
    /// Card movements in the order they happened
    pub events: Vec<CombatEvent>,
    /// Final die values of the turn
    #[serde(default)]
    pub dice: Vec<u8>,
    #[serde(default)]
    pub combination: Option<CombinationResult>,
    /// RFC 3339, filled in by [`TurnLogger::write`] when missing
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_turn_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// JSONL writer for [`TurnRecord`]s.
pub struct TurnLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl TurnLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that numbers turns but writes nothing.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_turn_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &TurnRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

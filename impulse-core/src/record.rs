//! Move history persistence
//!
//! The engine reports every executed move to a [`MoveRecorder`]. Two
//! recorders are provided:
//! - [`MemoryRecorder`]: keeps records in a `Vec`, for tests and replays
//! - [`FileRecorder`]: appends one JSON object per line to a log file
//!
//! A move is keyed by (ship, turn, impulse); recorders refuse a second
//! record under the same key.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::RecordError;
use crate::hex::HexPosition;
use crate::impulse::Impulse;

/// One executed move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub ship_id: EntityId,
    pub turn: u32,
    pub impulse: Impulse,
    pub position: HexPosition,
}

impl MoveRecord {
    fn key(&self) -> (EntityId, u32, Impulse) {
        (self.ship_id, self.turn, self.impulse)
    }
}

/// Sink for executed moves
pub trait MoveRecorder {
    fn record(&mut self, record: &MoveRecord) -> Result<(), RecordError>;
}

impl<R: MoveRecorder + ?Sized> MoveRecorder for Box<R> {
    fn record(&mut self, record: &MoveRecord) -> Result<(), RecordError> {
        (**self).record(record)
    }
}

impl<R: MoveRecorder + ?Sized> MoveRecorder for &mut R {
    fn record(&mut self, record: &MoveRecord) -> Result<(), RecordError> {
        (**self).record(record)
    }
}

// ============================================================================
// In-memory recorder
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    records: Vec<MoveRecord>,
    keys: FxHashSet<(EntityId, u32, Impulse)>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Records for one ship, oldest first
    pub fn history(&self, ship_id: EntityId) -> Vec<MoveRecord> {
        self.records
            .iter()
            .filter(|r| r.ship_id == ship_id)
            .copied()
            .collect()
    }
}

impl MoveRecorder for MemoryRecorder {
    fn record(&mut self, record: &MoveRecord) -> Result<(), RecordError> {
        if !self.keys.insert(record.key()) {
            return Err(duplicate(record));
        }
        self.records.push(*record);
        Ok(())
    }
}

// ============================================================================
// JSON-lines file recorder
// ============================================================================

/// Append-only move log, one JSON record per line.
///
/// Keys already in the file count as recorded, so a reopened log refuses
/// moves it holds from an earlier session.
pub struct FileRecorder {
    path: PathBuf,
    file: File,
    keys: FxHashSet<(EntityId, u32, Impulse)>,
}

impl FileRecorder {
    /// Open the log for appending, creating it and its directory if needed
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let keys: FxHashSet<_> = if path.exists() {
            read_log(path)?.iter().map(MoveRecord::key).collect()
        } else {
            FxHashSet::default()
        };
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        tracing::debug!("Opened move log: {} ({} moves)", path.display(), keys.len());

        Ok(Self {
            path: path.to_path_buf(),
            file,
            keys,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MoveRecorder for FileRecorder {
    fn record(&mut self, record: &MoveRecord) -> Result<(), RecordError> {
        if self.keys.contains(&record.key()) {
            return Err(duplicate(record));
        }

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        // unbuffered: nothing from a failed record may reach the file later
        self.file.write_all(&line)?;

        self.keys.insert(record.key());
        Ok(())
    }
}

/// Read every record from a move log
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<MoveRecord>, RecordError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    Ok(records)
}

fn duplicate(record: &MoveRecord) -> RecordError {
    RecordError::Duplicate {
        ship_id: record.ship_id,
        turn: record.turn,
        impulse: record.impulse,
    }
}

//! Error types for scenario loading and move recording

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::EntityId;
use crate::impulse::Impulse;

/// Fatal configuration problems. A session is never built past one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown ship type: {0}")]
    UnknownArchetype(String),

    #[error("unknown impulse label: {0}")]
    UnknownImpulse(String),

    #[error("unknown player label: {0}")]
    UnknownPlayer(String),

    #[error("power curve for {archetype} must have 3 values, found {found}")]
    MalformedCurve { archetype: String, found: usize },

    #[error("ship id {0} appears more than once in the rosters")]
    DuplicateShipId(EntityId),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ConfigError::Json {
            path: path.into(),
            source,
        }
    }
}

/// Failure to persist a move. The board has already changed when this surfaces.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("move already recorded for ship {ship_id} in turn {turn}, impulse {impulse}")]
    Duplicate {
        ship_id: EntityId,
        turn: u32,
        impulse: Impulse,
    },

    #[error("move log unavailable: {0}")]
    Unavailable(String),
}

/// Read a reference file into a string, tagging errors with the path
pub(crate) fn read_config_file(path: &std::path::Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
}

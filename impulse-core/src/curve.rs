//! Power curve reference table
//!
//! Every ship archetype has a fixed power curve (power, speed, turn radius).
//! The table is loaded once and handed to whoever builds ships.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{read_config_file, ConfigError};

/// Per-archetype performance triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerCurve {
    pub power: u8,
    pub speed: u8,
    pub turn_radius: u8,
}

impl PowerCurve {
    pub const fn new(power: u8, speed: u8, turn_radius: u8) -> Self {
        Self {
            power,
            speed,
            turn_radius,
        }
    }
}

/// One entry of the `ship_stats` array
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShipStats {
    #[serde(rename = "type")]
    pub archetype: String,
    pub curve: Vec<u8>,
}

#[derive(Deserialize)]
struct ShipStatsFile {
    ship_stats: Vec<ShipStats>,
}

/// Archetype name -> power curve
#[derive(Clone, Debug, Default)]
pub struct PowerCurveTable {
    curves: FxHashMap<String, PowerCurve>,
}

impl PowerCurveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw stats entries; later duplicates replace earlier ones
    pub fn from_entries(entries: &[ShipStats]) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for entry in entries {
            let curve = match entry.curve.as_slice() {
                &[power, speed, turn_radius] => PowerCurve::new(power, speed, turn_radius),
                other => {
                    return Err(ConfigError::MalformedCurve {
                        archetype: entry.archetype.clone(),
                        found: other.len(),
                    })
                }
            };
            table.insert(&entry.archetype, curve);
        }
        Ok(table)
    }

    /// Load from a JSON file of the form `{"ship_stats": [{"type": .., "curve": [p, s, t]}]}`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_config_file(path)?;
        let file: ShipStatsFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::json(path, e))?;
        let table = Self::from_entries(&file.ship_stats)?;
        tracing::debug!("Loaded {} ship types from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn insert(&mut self, archetype: &str, curve: PowerCurve) {
        self.curves.insert(archetype.to_string(), curve);
    }

    /// Curve for an archetype; a missing archetype is a configuration error
    pub fn get(&self, archetype: &str) -> Result<PowerCurve, ConfigError> {
        self.curves
            .get(archetype)
            .copied()
            .ok_or_else(|| ConfigError::UnknownArchetype(archetype.to_string()))
    }

    pub fn contains(&self, archetype: &str) -> bool {
        self.curves.contains_key(archetype)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Archetype names, sorted
    pub fn archetypes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.curves.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//! Scenario - starting rosters for a game session

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::curve::PowerCurveTable;
use crate::engine::{Engine, Rosters};
use crate::entity::IdMint;
use crate::error::{read_config_file, ConfigError};
use crate::hex::{HexPosition, Orientation};
use crate::impulse::{ImpulseTable, Player};
use crate::record::MoveRecorder;
use crate::ship::Ship;

/// A ship as written in a scenario file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShipSetup {
    #[serde(rename = "type")]
    pub archetype: String,
    pub name: String,
    /// Scenario maps are small; larger coordinates are rejected on load
    pub row: i16,
    pub col: i16,
    /// Missing or malformed headings point NE
    #[serde(default)]
    pub facing: Option<String>,
}

impl ShipSetup {
    pub fn position(&self) -> HexPosition {
        let facing = self
            .facing
            .as_deref()
            .map(Orientation::parse_or_default)
            .unwrap_or_default();
        HexPosition::new(self.row.into(), self.col.into(), facing)
    }

    fn build(&self, curves: &PowerCurveTable, ids: &mut IdMint) -> Result<Ship, ConfigError> {
        Ship::new(&self.archetype, &self.name, self.position(), curves, ids)
    }
}

/// Starting setup of a session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    /// Player moving first in every impulse; Talon unless stated
    #[serde(default)]
    pub initiative: Option<String>,
    #[serde(default)]
    pub talon_ships: Vec<ShipSetup>,
    #[serde(default)]
    pub terran_ships: Vec<ShipSetup>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

impl Scenario {
    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_config_file(path)?;
        let scenario: Scenario =
            serde_json::from_str(&content).map_err(|e| ConfigError::json(path, e))?;
        tracing::debug!(
            "Loaded scenario {} ({} + {} ships) from {}",
            scenario.name,
            scenario.talon_ships.len(),
            scenario.terran_ships.len(),
            path.display()
        );
        Ok(scenario)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::json(path, e))?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }

    pub fn initiative(&self) -> Result<Player, ConfigError> {
        match &self.initiative {
            Some(label) => label.parse(),
            None => Ok(Player::Talon),
        }
    }

    /// Materialize both rosters. Any unknown ship type aborts the whole load.
    pub fn build_rosters(&self, curves: &PowerCurveTable, ids: &mut IdMint) -> Result<Rosters, ConfigError> {
        let talon = self
            .talon_ships
            .iter()
            .map(|s| s.build(curves, ids))
            .collect::<Result<Vec<_>, _>>()?;
        let terran = self
            .terran_ships
            .iter()
            .map(|s| s.build(curves, ids))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rosters::new(talon, terran))
    }

    /// Build a ready-to-start session for this scenario
    pub fn into_engine<R: MoveRecorder>(
        &self,
        curves: &PowerCurveTable,
        table: Arc<ImpulseTable>,
        recorder: R,
    ) -> Result<Engine<R>, ConfigError> {
        let initiative = self.initiative()?;
        let mut ids = IdMint::new();
        let rosters = self.build_rosters(curves, &mut ids)?;

        tracing::info!("Scenario {} ready", self.name);

        Ok(Engine::new(rosters, table, recorder)?.with_initiative(initiative))
    }
}

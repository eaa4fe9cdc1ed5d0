//! Impulses, players and the per-impulse eligibility table

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{read_config_file, ConfigError};

// ============================================================================
// PLAYERS
// ============================================================================

/// Side in the game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    #[default]
    #[serde(rename = "TALON")]
    Talon,
    #[serde(rename = "TERRAN")]
    Terran,
}

/// Players in turn order
pub const PLAYERS: [Player; 2] = [Player::Talon, Player::Terran];

impl Player {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        PLAYERS[(self.index() + 1) % PLAYERS.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::Talon => "TALON",
            Player::Terran => "TERRAN",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Player {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PLAYERS
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPlayer(s.to_string()))
    }
}

// ============================================================================
// IMPULSES
// ============================================================================

/// Sub-phase of a game turn. Six movement impulses then the power phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impulse {
    A,
    B,
    C,
    D,
    E,
    F,
    #[serde(rename = "Power Phase")]
    Power,
}

/// Impulses in the order they are played
pub const IMPULSES: [Impulse; 7] = [
    Impulse::A,
    Impulse::B,
    Impulse::C,
    Impulse::D,
    Impulse::E,
    Impulse::F,
    Impulse::Power,
];

impl Impulse {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Following impulse; the power phase wraps back to A
    pub fn next(self) -> Self {
        IMPULSES[(self.index() + 1) % IMPULSES.len()]
    }

    pub fn is_power_phase(self) -> bool {
        self == Impulse::Power
    }

    pub fn label(self) -> &'static str {
        match self {
            Impulse::A => "A",
            Impulse::B => "B",
            Impulse::C => "C",
            Impulse::D => "D",
            Impulse::E => "E",
            Impulse::F => "F",
            Impulse::Power => "Power Phase",
        }
    }
}

impl fmt::Display for Impulse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Impulse {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IMPULSES
            .iter()
            .copied()
            .find(|i| i.label() == s)
            .ok_or_else(|| ConfigError::UnknownImpulse(s.to_string()))
    }
}

// ============================================================================
// ELIGIBILITY TABLE
// ============================================================================

/// One block of the `impulses` array, as written in the config file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImpulseEntry {
    pub impulse: String,
    pub curve: Vec<u8>,
}

#[derive(Deserialize)]
struct ImpulseFile {
    impulses: Vec<ImpulseEntry>,
}

/// Power curve values that unlock action or movement in each impulse
#[derive(Clone, Debug, Default)]
pub struct ImpulseTable {
    values: FxHashMap<Impulse, FxHashSet<u8>>,
}

impl ImpulseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config entries. Unknown labels are fatal; repeated
    /// impulses are merged.
    pub fn from_entries(entries: &[ImpulseEntry]) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for entry in entries {
            let impulse: Impulse = entry.impulse.parse()?;
            table.extend(impulse, entry.curve.iter().copied());
        }
        Ok(table)
    }

    /// Load from a JSON file of the form `{"impulses": [{"impulse": "A", "curve": [4, 5, 6]}]}`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_config_file(path)?;
        let file: ImpulseFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::json(path, e))?;
        let table = Self::from_entries(&file.impulses)?;
        tracing::debug!("Loaded impulse table from {}", path.display());
        Ok(table)
    }

    /// Add curve values for an impulse
    pub fn extend(&mut self, impulse: Impulse, values: impl IntoIterator<Item = u8>) {
        self.values.entry(impulse).or_default().extend(values);
    }

    /// True if `value` grants eligibility during `impulse`
    pub fn allows(&self, impulse: Impulse, value: u8) -> bool {
        self.values
            .get(&impulse)
            .is_some_and(|set| set.contains(&value))
    }

    /// Values for an impulse, sorted ascending
    pub fn values(&self, impulse: Impulse) -> Vec<u8> {
        let mut values: Vec<u8> = self
            .values
            .get(&impulse)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        values.sort_unstable();
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(impulse: &str, curve: &[u8]) -> ImpulseEntry {
        ImpulseEntry {
            impulse: impulse.to_string(),
            curve: curve.to_vec(),
        }
    }

    #[test]
    fn test_impulse_cycle() {
        let mut impulse = Impulse::A;
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(impulse);
            impulse = impulse.next();
        }
        assert_eq!(&seen[..7], &IMPULSES);
        assert_eq!(seen[7], Impulse::A);
        assert_eq!(Impulse::Power.next(), Impulse::A);
    }

    #[test]
    fn test_player_cycle() {
        assert_eq!(Player::Talon.next(), Player::Terran);
        assert_eq!(Player::Terran.next(), Player::Talon);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Impulse::Power.to_string(), "Power Phase");
        assert_eq!("Power Phase".parse::<Impulse>().unwrap(), Impulse::Power);
        assert_eq!("C".parse::<Impulse>().unwrap(), Impulse::C);
        assert!(matches!("G".parse::<Impulse>(), Err(ConfigError::UnknownImpulse(_))));
        assert_eq!(Player::Terran.to_string(), "TERRAN");
        assert_eq!("talon".parse::<Player>().unwrap(), Player::Talon);
        assert_eq!(serde_json::to_string(&Impulse::Power).unwrap(), "\"Power Phase\"");
        assert_eq!(serde_json::to_string(&Player::Talon).unwrap(), "\"TALON\"");
    }

    #[test]
    fn test_table_lookup() {
        let table = ImpulseTable::from_entries(&[
            entry("A", &[4, 5, 6]),
            entry("B", &[3, 5, 6]),
            entry("E", &[6]),
        ])
        .unwrap();

        assert_eq!(table.values(Impulse::A), vec![4, 5, 6]);
        assert_eq!(table.values(Impulse::B), vec![3, 5, 6]);
        assert!(table.allows(Impulse::B, 3));
        assert!(!table.allows(Impulse::B, 2));
        assert!(table.values(Impulse::C).is_empty());
        assert!(!table.allows(Impulse::Power, 6));
    }

    #[test]
    fn test_repeated_impulse_merges() {
        let table = ImpulseTable::from_entries(&[entry("F", &[1, 2]), entry("F", &[2, 3])]).unwrap();
        assert_eq!(table.values(Impulse::F), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_label_is_fatal() {
        let err = ImpulseTable::from_entries(&[entry("Z", &[1])]).unwrap_err();
        assert_eq!(err.to_string(), "unknown impulse label: Z");
    }
}

//! Hex map geometry with offset coordinates (axes at 45 degrees)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ship heading, clockwise from north-east
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

/// Orientations in clockwise order
pub const ORIENTATIONS: [Orientation; 6] = [
    Orientation::NE,
    Orientation::E,
    Orientation::SE,
    Orientation::SW,
    Orientation::W,
    Orientation::NW,
];

/// Step vectors (drow, dcol), indexed like ORIENTATIONS
pub const OFFSETS: [(i32, i32); 6] = [
    (-1, 0),  // NE
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // SW
    (0, -1),  // W
    (-1, -1), // NW
];

impl Orientation {
    /// Position in the clockwise cycle (0-5)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next heading clockwise (NW wraps to NE)
    pub fn next(self) -> Self {
        ORIENTATIONS[(self.index() + 1) % ORIENTATIONS.len()]
    }

    /// Next heading counter-clockwise (NE wraps to NW)
    pub fn previous(self) -> Self {
        ORIENTATIONS[(self.index() + ORIENTATIONS.len() - 1) % ORIENTATIONS.len()]
    }

    /// Step vector for one hex of travel in this direction
    pub fn offset(self) -> (i32, i32) {
        OFFSETS[self.index()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::NE => "NE",
            Orientation::E => "E",
            Orientation::SE => "SE",
            Orientation::SW => "SW",
            Orientation::W => "W",
            Orientation::NW => "NW",
        }
    }

    /// Lenient parse used for scenario files: anything unrecognised points NE
    pub fn parse_or_default(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!("Unrecognised orientation {:?}, defaulting to NE", label);
            Orientation::NE
        })
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned by strict orientation parsing
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation: {0}")]
pub struct ParseOrientationError(pub String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ORIENTATIONS
            .iter()
            .copied()
            .find(|o| o.label() == s)
            .ok_or_else(|| ParseOrientationError(s.to_string()))
    }
}

/// Hex cell plus the heading of whatever occupies it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexPosition {
    pub row: i32,
    pub col: i32,
    pub facing: Orientation,
}

impl HexPosition {
    pub const fn new(row: i32, col: i32, facing: Orientation) -> Self {
        Self { row, col, facing }
    }

    /// Position facing NE
    pub const fn at(row: i32, col: i32) -> Self {
        Self::new(row, col, Orientation::NE)
    }

    /// Advance one hex toward `direction`, ending up facing it.
    /// Coordinates stop at the edge of the `i32` range.
    pub fn step(&self, direction: Orientation) -> HexPosition {
        let (drow, dcol) = direction.offset();
        HexPosition::new(self.row.saturating_add(drow), self.col.saturating_add(dcol), direction)
    }

    /// Distance in hexes, facing ignored
    pub fn distance_to(&self, other: &HexPosition) -> i32 {
        distance(self, other)
    }
}

impl fmt::Display for HexPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.row, self.col, self.facing)
    }
}

/// Distance between two hex centres, capped at `i32::MAX`
pub fn distance(a: &HexPosition, b: &HexPosition) -> i32 {
    let drow = i64::from(a.row) - i64::from(b.row);
    let dcol = i64::from(a.col) - i64::from(b.col);
    let hexes = (drow - dcol).abs().max(drow.abs()).max(dcol.abs());
    i32::try_from(hexes).unwrap_or(i32::MAX)
}

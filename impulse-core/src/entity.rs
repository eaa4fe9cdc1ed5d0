//! Identified, named objects placed on the hex map

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hex::HexPosition;

/// Unique identifier of an object on the map
pub type EntityId = u32;

/// Hands out unique entity ids. Owned by whoever creates map objects.
#[derive(Clone, Debug, Default)]
pub struct IdMint {
    next: EntityId,
}

impl IdMint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// Something on the map: identity, display name, type and position.
///
/// Equality ignores the id: two objects with the same type, name and
/// position are equal even though they are distinct objects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapEntity {
    id: EntityId,
    name: String,
    archetype: String,
    position: HexPosition,
}

impl MapEntity {
    pub fn new(id: EntityId, archetype: &str, name: &str, position: HexPosition) -> Self {
        Self {
            id,
            name: name.to_string(),
            archetype: archetype.to_string(),
            position,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    pub fn position(&self) -> HexPosition {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: HexPosition) {
        self.position = position;
    }
}

impl PartialEq for MapEntity {
    fn eq(&self, other: &Self) -> bool {
        self.archetype == other.archetype
            && self.name == other.name
            && self.position == other.position
    }
}

impl Eq for MapEntity {}

impl fmt::Display for MapEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.archetype, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Orientation;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_ids_are_unique() {
        let mut mint = IdMint::new();
        let mut seen = FxHashSet::default();
        for _ in 0..100_000 {
            assert!(seen.insert(mint.mint()));
        }
        assert_eq!(mint.issued(), 100_000);
    }

    #[test]
    fn test_equality_ignores_id() {
        let pos = HexPosition::new(5, 9, Orientation::SW);
        let a = MapEntity::new(4, "typetest", "vaisseautest", pos);
        let b = MapEntity::new(5, "typetest", "vaisseautest", pos);
        assert_eq!(a, b);

        let moved = MapEntity::new(4, "typetest", "vaisseautest", HexPosition::new(6, 7, Orientation::NW));
        assert_ne!(a, moved);
        let renamed = MapEntity::new(4, "typetest", "vaisseautest2", pos);
        assert_ne!(a, renamed);
    }

    #[test]
    fn test_display() {
        let e = MapEntity::new(0, "Talon FF", "Surprise", HexPosition::at(10, 11));
        assert_eq!(e.to_string(), "Talon FF Surprise");
    }
}

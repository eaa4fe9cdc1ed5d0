//! Starships: a map entity with a power curve and movement rules

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::{PowerCurve, PowerCurveTable};
use crate::entity::{EntityId, IdMint, MapEntity};
use crate::error::ConfigError;
use crate::hex::{HexPosition, Orientation};

/// A starship on the map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    entity: MapEntity,
    curve: PowerCurve,
}

impl Ship {
    /// Create a ship, resolving its power curve from the reference table.
    ///
    /// The id is only minted once the archetype is known.
    pub fn new(
        archetype: &str,
        name: &str,
        position: HexPosition,
        curves: &PowerCurveTable,
        ids: &mut IdMint,
    ) -> Result<Self, ConfigError> {
        let curve = curves.get(archetype)?;
        Ok(Self::with_curve(ids.mint(), archetype, name, position, curve))
    }

    /// Create a ship from an already-resolved curve
    pub fn with_curve(
        id: EntityId,
        archetype: &str,
        name: &str,
        position: HexPosition,
        curve: PowerCurve,
    ) -> Self {
        Self {
            entity: MapEntity::new(id, archetype, name, position),
            curve,
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn archetype(&self) -> &str {
        self.entity.archetype()
    }

    pub fn position(&self) -> HexPosition {
        self.entity.position()
    }

    pub fn facing(&self) -> Orientation {
        self.entity.position().facing
    }

    pub fn curve(&self) -> PowerCurve {
        self.curve
    }

    pub fn entity(&self) -> &MapEntity {
        &self.entity
    }

    /// Advance one hex along the current heading
    pub fn move_straight(&mut self) {
        let facing = self.facing();
        self.advance(facing);
    }

    /// Only a 60 degree turn to either adjacent heading is legal.
    /// Turn radius does not restrict this yet.
    pub fn can_turn(&self, orientation: Orientation) -> bool {
        let facing = self.facing();
        orientation == facing.next() || orientation == facing.previous()
    }

    /// Turn one hexside and advance. Illegal turns leave the ship untouched
    /// and return false.
    pub fn turn(&mut self, orientation: Orientation) -> bool {
        if !self.can_turn(orientation) {
            return false;
        }
        self.advance(orientation);
        true
    }

    fn advance(&mut self, direction: Orientation) {
        let next = self.entity.position().step(direction);
        self.entity.set_position(next);
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.entity, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_table() -> PowerCurveTable {
        let mut table = PowerCurveTable::new();
        table.insert("typetest", PowerCurve::new(77, 13, 3));
        table.insert("Terran DD", PowerCurve::new(2, 3, 1));
        table
    }

    #[test]
    fn test_creation_and_getters() {
        let table = curve_table();
        let mut ids = IdMint::new();
        let pos = HexPosition::new(5, 9, Orientation::SW);
        let ship = Ship::new("typetest", "vaisseautest", pos, &table, &mut ids).unwrap();

        assert_eq!(ship.to_string(), "typetest vaisseautest");
        assert_eq!(ship.id(), 0);
        assert_eq!(ship.curve(), PowerCurve::new(77, 13, 3));
        assert_eq!(ship.position(), pos);
    }

    #[test]
    fn test_unknown_archetype_is_fatal() {
        let table = curve_table();
        let mut ids = IdMint::new();
        let err = Ship::new("USS Enterprise", "NCC-1701", HexPosition::at(0, 0), &table, &mut ids)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownArchetype(_)));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_equality() {
        let pos = HexPosition::new(5, 9, Orientation::SW);
        let curve = PowerCurve::new(77, 13, 3);
        let ship = Ship::with_curve(4, "typetest", "vaisseautest", pos, curve);

        // same characteristics, different id: equal but not the same ship
        assert_eq!(ship, Ship::with_curve(5, "typetest", "vaisseautest", pos, curve));

        let other_curve = Ship::with_curve(4, "typetest", "vaisseautest", pos, PowerCurve::new(5, 2, 0));
        assert_ne!(ship, other_curve);

        let other_pos = Ship::with_curve(4, "typetest", "vaisseautest", HexPosition::new(6, 7, Orientation::NW), curve);
        assert_ne!(ship, other_pos);

        let other_name = Ship::with_curve(4, "typetest", "vaisseautest2", pos, curve);
        assert_ne!(ship, other_name);
    }

    #[test]
    fn test_move_straight() {
        let mut ship = Ship::with_curve(0, "Terran DD", "Caleb", HexPosition::new(0, 8, Orientation::SW), PowerCurve::new(2, 3, 1));
        ship.move_straight();
        assert_eq!(ship.position(), HexPosition::new(1, 8, Orientation::SW));
        ship.move_straight();
        assert_eq!(ship.position(), HexPosition::new(2, 8, Orientation::SW));
    }

    #[test]
    fn test_turn_to_adjacent_heading() {
        let mut ship = Ship::with_curve(0, "Terran DD", "Caleb", HexPosition::new(0, 8, Orientation::SW), PowerCurve::new(2, 3, 1));
        assert!(ship.can_turn(Orientation::SE));
        assert!(ship.can_turn(Orientation::W));
        assert!(ship.turn(Orientation::SE));
        assert_eq!(ship.position(), HexPosition::new(1, 9, Orientation::SE));
    }

    #[test]
    fn test_illegal_turn_is_ignored() {
        let start = HexPosition::new(0, 8, Orientation::SW);
        let mut ship = Ship::with_curve(0, "Terran DD", "Caleb", start, PowerCurve::new(2, 3, 1));
        for illegal in [Orientation::SW, Orientation::NE, Orientation::E, Orientation::NW] {
            assert!(!ship.can_turn(illegal));
            assert!(!ship.turn(illegal));
            assert_eq!(ship.position(), start);
        }
    }

    #[test]
    fn test_turn_wraps_around_cycle() {
        let mut ship = Ship::with_curve(0, "Talon FF", "Surprise", HexPosition::new(10, 11, Orientation::NE), PowerCurve::new(2, 3, 0));
        assert!(ship.can_turn(Orientation::NW));
        assert!(ship.turn(Orientation::NW));
        assert_eq!(ship.position(), HexPosition::new(9, 10, Orientation::NW));
        assert!(ship.turn(Orientation::NE));
        assert_eq!(ship.position(), HexPosition::new(8, 10, Orientation::NE));
    }
}

//! Turn and impulse engine
//!
//! Owns both rosters and the progression state of a single game session:
//! current impulse, current player, turn counter, and which ships may act
//! or must move in the current sub-turn.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::{ConfigError, RecordError};
use crate::hex::{HexPosition, Orientation};
use crate::impulse::{Impulse, ImpulseTable, Player};
use crate::record::{MoveRecord, MoveRecorder};
use crate::ship::Ship;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Ships of both players, in scenario order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rosters {
    pub talon: Vec<Ship>,
    pub terran: Vec<Ship>,
}

impl Rosters {
    pub fn new(talon: Vec<Ship>, terran: Vec<Ship>) -> Self {
        Self { talon, terran }
    }

    pub fn get(&self, player: Player) -> &[Ship] {
        match player {
            Player::Talon => &self.talon,
            Player::Terran => &self.terran,
        }
    }

    fn get_mut(&mut self, player: Player) -> &mut Vec<Ship> {
        match player {
            Player::Talon => &mut self.talon,
            Player::Terran => &mut self.terran,
        }
    }

    /// All ships with their owner
    pub fn iter(&self) -> impl Iterator<Item = (Player, &Ship)> + '_ {
        self.talon
            .iter()
            .map(|s| (Player::Talon, s))
            .chain(self.terran.iter().map(|s| (Player::Terran, s)))
    }

    pub fn len(&self) -> usize {
        self.talon.len() + self.terran.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, id: EntityId) -> Option<&Ship> {
        self.iter().map(|(_, s)| s).find(|s| s.id() == id)
    }
}

/// Snapshot of the board situation handed back after every call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Situation {
    pub current_player: Player,
    pub can_act: Vec<EntityId>,
    pub must_move: Vec<EntityId>,
    pub current_impulse: Impulse,
    pub current_turn: u32,
}

// ============================================================================
// ENGINE
// ============================================================================

/// One game session
pub struct Engine<R> {
    rosters: Rosters,
    table: Arc<ImpulseTable>,
    recorder: R,

    /// Player acting first in every impulse
    initiative: Player,

    current_impulse: Impulse,
    current_player: Player,
    current_turn: u32,
    first_player_turn: bool,
    game_started: bool,

    /// Ships allowed to act this sub-turn
    can_act: Vec<EntityId>,
    /// Ships that still owe their move this sub-turn
    must_move: Vec<EntityId>,
}

impl<R: MoveRecorder> Engine<R> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a session. Ship ids must be unique across both rosters.
    pub fn new(rosters: Rosters, table: Arc<ImpulseTable>, recorder: R) -> Result<Self, ConfigError> {
        let mut ids = FxHashSet::default();
        for (_, ship) in rosters.iter() {
            if !ids.insert(ship.id()) {
                return Err(ConfigError::DuplicateShipId(ship.id()));
            }
        }

        tracing::info!(
            "New session: {} Talon ships, {} Terran ships",
            rosters.talon.len(),
            rosters.terran.len()
        );

        Ok(Self {
            rosters,
            table,
            recorder,
            initiative: Player::Talon,
            current_impulse: Impulse::A,
            current_player: Player::Talon,
            current_turn: 1,
            first_player_turn: true,
            game_started: false,
            can_act: Vec::new(),
            must_move: Vec::new(),
        })
    }

    /// Set who holds the initiative. Only meaningful before the game starts.
    pub fn with_initiative(mut self, player: Player) -> Self {
        self.initiative = player;
        if !self.game_started {
            self.current_player = player;
        }
        self
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn initiative(&self) -> Player {
        self.initiative
    }

    pub fn is_started(&self) -> bool {
        self.game_started
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Copy of both rosters; changes to it never reach the session
    pub fn all_ships(&self) -> Rosters {
        self.rosters.clone()
    }

    /// Look up a ship of either player
    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.rosters.find(id)
    }

    /// Current situation, without touching any state
    pub fn situation(&self) -> Situation {
        Situation {
            current_player: self.current_player,
            can_act: self.can_act.clone(),
            must_move: self.must_move.clone(),
            current_impulse: self.current_impulse,
            current_turn: self.current_turn,
        }
    }

    // ========================================================================
    // PROGRESSION
    // ========================================================================

    /// Start the game. Only the first call has any effect.
    pub fn start_game(&mut self) -> Situation {
        if !self.game_started {
            self.current_impulse = Impulse::A;
            self.first_player_turn = true;
            self.current_player = self.initiative;
            self.game_started = true;
            self.refresh_eligibility();

            tracing::info!("Game started, {} has the initiative", self.initiative);
        }
        self.situation()
    }

    /// Hand over to the next player, moving to the next impulse after the
    /// second player. Starts the game if needed.
    pub fn advance_impulse(&mut self) -> Situation {
        if !self.game_started {
            return self.start_game();
        }

        if !self.first_player_turn {
            self.current_impulse = self.current_impulse.next();
            if self.current_impulse == Impulse::A {
                self.current_turn += 1;
                tracing::info!("Turn {} begins", self.current_turn);
            }
        }
        self.first_player_turn = !self.first_player_turn;
        self.current_player = self.current_player.next();

        self.refresh_eligibility();

        tracing::debug!(
            turn = self.current_turn,
            impulse = %self.current_impulse,
            player = %self.current_player,
            can_act = self.can_act.len(),
            must_move = self.must_move.len(),
            "Impulse advanced"
        );

        self.situation()
    }

    /// Rebuild both eligibility lists for the current impulse and player
    fn refresh_eligibility(&mut self) {
        self.can_act.clear();
        self.must_move.clear();

        // power phase eligibility has no rules yet
        if self.current_impulse.is_power_phase() {
            return;
        }

        let impulse = self.current_impulse;
        for ship in self.rosters.get(self.current_player) {
            let curve = ship.curve();
            if self.table.allows(impulse, curve.power) {
                self.can_act.push(ship.id());
            }
            if self.table.allows(impulse, curve.speed) {
                self.must_move.push(ship.id());
            }
        }
    }

    // ========================================================================
    // ORDERS
    // ========================================================================

    /// Move a ship one hex straight ahead.
    ///
    /// Ships not due to move are ignored. A recording failure is returned
    /// after the move has been applied.
    pub fn move_ship_straight(&mut self, ship_id: EntityId) -> Result<Situation, RecordError> {
        let Some(index) = self.take_ship_to_move(ship_id) else {
            return Ok(self.situation());
        };

        let ship = &mut self.rosters.get_mut(self.current_player)[index];
        ship.move_straight();
        let position = ship.position();

        self.record_move(ship_id, position)?;
        Ok(self.situation())
    }

    /// Turn a ship toward an adjacent heading and move it one hex.
    ///
    /// The order uses up the ship's move even when the turn is illegal and
    /// nothing happens on the board; only real moves are recorded.
    pub fn turn_ship(&mut self, ship_id: EntityId, orientation: Orientation) -> Result<Situation, RecordError> {
        let Some(index) = self.take_ship_to_move(ship_id) else {
            return Ok(self.situation());
        };

        let ship = &mut self.rosters.get_mut(self.current_player)[index];
        if !ship.turn(orientation) {
            tracing::debug!("Illegal turn to {} for ship {} ignored", orientation, ship_id);
            return Ok(self.situation());
        }
        let position = ship.position();

        self.record_move(ship_id, position)?;
        Ok(self.situation())
    }

    /// If the ship is due to move, strike it from the list and return its
    /// index in the current player's roster
    fn take_ship_to_move(&mut self, ship_id: EntityId) -> Option<usize> {
        let Some(slot) = self.must_move.iter().position(|&id| id == ship_id) else {
            tracing::debug!("Ship {} is not due to move, order ignored", ship_id);
            return None;
        };
        self.must_move.remove(slot);

        self.rosters
            .get(self.current_player)
            .iter()
            .position(|s| s.id() == ship_id)
    }

    fn record_move(&mut self, ship_id: EntityId, position: HexPosition) -> Result<(), RecordError> {
        let record = MoveRecord {
            ship_id,
            turn: self.current_turn,
            impulse: self.current_impulse,
            position,
        };
        tracing::debug!("Ship {} moved to {}", ship_id, position);

        self.recorder.record(&record).inspect_err(|e| {
            tracing::warn!("Failed to record move of ship {}: {}", ship_id, e);
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

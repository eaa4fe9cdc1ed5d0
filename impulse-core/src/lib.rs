//! Impulse Core - Turn/impulse engine for hex-grid starship combat
//!
//! This crate provides the core game logic:
//! - Hex map geometry (offset coordinates, six headings)
//! - Power curve and impulse eligibility reference tables
//! - Ships and their movement rules
//! - The turn/impulse state machine driving a session
//! - Scenario loading and move history recording

pub mod hex;
pub mod curve;
pub mod entity;
pub mod ship;
pub mod impulse;
pub mod engine;
pub mod scenario;
pub mod record;
pub mod error;

// Re-exports for convenient access
pub use hex::{distance, HexPosition, Orientation, ORIENTATIONS};
pub use curve::{PowerCurve, PowerCurveTable};
pub use entity::{EntityId, IdMint, MapEntity};
pub use ship::Ship;
pub use impulse::{Impulse, ImpulseTable, Player, IMPULSES, PLAYERS};
pub use engine::{Engine, Rosters, Situation};
pub use scenario::{Scenario, ShipSetup};
pub use record::{read_log, FileRecorder, MemoryRecorder, MoveRecord, MoveRecorder};
pub use error::{ConfigError, RecordError};

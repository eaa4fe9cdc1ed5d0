//! Check command - validate reference data and a scenario
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_report(), print_report()
//! - Level 3: eligibility_schedule()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use impulse_core::{
    Engine, EntityId, ImpulseTable, MemoryRecorder, MoveRecorder, PowerCurveTable, Ship, IMPULSES,
};

use crate::config::{load_scenario, TableArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Scenario JSON file
    #[arg(long, value_name = "FILE", default_value = "data/scenarios/scenar2.json")]
    pub scenario: PathBuf,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// One ship of the checked scenario
#[derive(Clone, Debug, Serialize)]
struct ShipReport {
    player: String,
    id: EntityId,
    ship: String,
    position: String,
    power: u8,
    speed: u8,
    turn_radius: u8,
    /// Impulses in which the ship may act
    acts: Vec<String>,
    /// Impulses in which the ship must move
    moves: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct CheckReport {
    scenario: String,
    initiative: String,
    archetypes: Vec<String>,
    ships: Vec<ShipReport>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run check command
///
/// This function reads like a table of contents:
/// 1. Load the tables and build a session from the scenario
/// 2. Work out each ship's schedule
/// 3. Print the report
pub fn run(args: CheckArgs) -> Result<()> {
    let data = args.tables.load()?;
    let scenario = load_scenario(&args.scenario)?;

    let engine = scenario
        .into_engine(&data.curves, data.impulses.clone(), MemoryRecorder::new())
        .with_context(|| format!("Invalid scenario: {}", args.scenario.display()))?;

    let report = build_report(&scenario.name, &engine, &data.curves, &data.impulses);

    tracing::info!("Scenario {} is valid", report.scenario);

    print_report(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_report<R: MoveRecorder>(
    name: &str,
    engine: &Engine<R>,
    curves: &PowerCurveTable,
    table: &ImpulseTable,
) -> CheckReport {
    let ships = engine
        .all_ships()
        .iter()
        .map(|(player, ship)| {
            let (acts, moves) = eligibility_schedule(ship, table);
            let curve = ship.curve();
            ShipReport {
                player: player.label().to_string(),
                id: ship.id(),
                ship: ship.to_string(),
                position: ship.position().to_string(),
                power: curve.power,
                speed: curve.speed,
                turn_radius: curve.turn_radius,
                acts,
                moves,
            }
        })
        .collect();

    CheckReport {
        scenario: name.to_string(),
        initiative: engine.initiative().label().to_string(),
        archetypes: curves.archetypes().into_iter().map(str::to_string).collect(),
        ships,
    }
}

fn print_report(report: &CheckReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\n=== Scenario {} ===", report.scenario);
    println!("Initiative: {}", report.initiative);
    println!("Ship types: {}", report.archetypes.join(", "));
    println!();
    for ship in &report.ships {
        println!(
            "{:<6} #{:<3} {:<24} {:<10} acts in {:<12} moves in {}",
            ship.player,
            ship.id,
            ship.ship,
            ship.position,
            join_or_dash(&ship.acts),
            join_or_dash(&ship.moves)
        );
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Impulses of one turn in which the ship may act and must move
fn eligibility_schedule(ship: &Ship, table: &ImpulseTable) -> (Vec<String>, Vec<String>) {
    let curve = ship.curve();
    let playable = || IMPULSES.iter().copied().filter(|i| !i.is_power_phase());

    let acts = playable()
        .filter(|&i| table.allows(i, curve.power))
        .map(|i| i.label().to_string())
        .collect();
    let moves = playable()
        .filter(|&i| table.allows(i, curve.speed))
        .map(|i| i.label().to_string())
        .collect();

    (acts, moves)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn join_or_dash(labels: &[String]) -> String {
    if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impulse_core::{HexPosition, IdMint, Impulse, Orientation, PowerCurve};

    fn table() -> ImpulseTable {
        let mut table = ImpulseTable::new();
        table.extend(Impulse::A, [4, 5, 6]);
        table.extend(Impulse::B, [3, 5, 6]);
        table.extend(Impulse::C, [2, 4, 5, 6]);
        table.extend(Impulse::D, [3, 4, 5, 6]);
        table.extend(Impulse::E, [6]);
        table.extend(Impulse::F, [1, 2, 3, 4, 5, 6]);
        table
    }

    #[test]
    fn test_eligibility_schedule() {
        let mut curves = PowerCurveTable::new();
        curves.insert("Terran CL", PowerCurve::new(3, 3, 1));
        curves.insert("Talon FF", PowerCurve::new(2, 3, 0));
        let mut ids = IdMint::new();
        let position = HexPosition::new(0, 0, Orientation::NE);

        let thor = Ship::new("Terran CL", "Thor", position, &curves, &mut ids).unwrap();
        let (acts, moves) = eligibility_schedule(&thor, &table());
        assert_eq!(acts, vec!["B", "D", "F"]);
        assert_eq!(moves, vec!["B", "D", "F"]);

        let surprise = Ship::new("Talon FF", "Surprise", position, &curves, &mut ids).unwrap();
        let (acts, _) = eligibility_schedule(&surprise, &table());
        assert_eq!(acts, vec!["C", "F"]);
    }

    #[test]
    fn test_join_or_dash() {
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&["B".to_string(), "D".to_string()]), "BD");
    }
}

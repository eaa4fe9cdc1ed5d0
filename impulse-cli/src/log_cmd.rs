//! Log command - inspect a move log
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_records(), report_records()
//! - Level 3: select_records()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use impulse_core::{read_log, EntityId, MoveRecord};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct LogArgs {
    /// JSON-lines move log written by `play --log`
    #[arg(long, value_name = "FILE", default_value = "moves.jsonl")]
    pub log: PathBuf,

    /// Only show moves of this ship
    #[arg(long)]
    pub ship: Option<EntityId>,

    /// Only show moves of this turn
    #[arg(long)]
    pub turn: Option<u32>,

    /// Output records as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run log command
///
/// This function reads like a table of contents:
/// 1. Read the whole log
/// 2. Keep the requested records
/// 3. Report them
pub fn run(args: LogArgs) -> Result<()> {
    let records = load_records(&args)?;
    let selected = select_records(records, args.ship, args.turn);

    tracing::info!("{} records selected from {}", selected.len(), args.log.display());

    report_records(&selected, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_records(args: &LogArgs) -> Result<Vec<MoveRecord>> {
    read_log(&args.log).with_context(|| format!("Failed to read move log: {}", args.log.display()))
}

fn report_records(records: &[MoveRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    println!("\n=== Move Log ===");
    for record in records {
        println!("{}", format_record(record));
    }
    println!("{} moves", records.len());
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Apply the ship and turn filters, keeping log order
fn select_records(records: Vec<MoveRecord>, ship: Option<EntityId>, turn: Option<u32>) -> Vec<MoveRecord> {
    records
        .into_iter()
        .filter(|r| ship.map_or(true, |id| r.ship_id == id))
        .filter(|r| turn.map_or(true, |t| r.turn == t))
        .collect()
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_record(record: &MoveRecord) -> String {
    format!(
        "turn {:>3}  {:<11}  ship #{:<3}  -> {}",
        record.turn, record.impulse, record.ship_id, record.position
    )
}

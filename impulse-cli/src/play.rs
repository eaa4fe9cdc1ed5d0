//! Play command - drive a session with line commands
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_session(), run_session()
//! - Level 3: parse_command(), execute()
//! - Level 4: formatting utilities
//!
//! Commands are read one per line, from stdin or a script file:
//!
//! ```text
//! start                 start the game
//! advance | end         hand over to the next player / impulse
//! move <id>             move a ship one hex straight ahead
//! turn <id> <heading>   turn a ship to an adjacent heading and move it
//! ships                 list both rosters
//! situation             show the current situation
//! help                  list commands
//! quit                  leave the session
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use impulse_core::{
    Engine, EntityId, FileRecorder, MemoryRecorder, MoveRecorder, Orientation, Situation,
};

use crate::config::{load_scenario, TableArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Scenario JSON file
    #[arg(long, value_name = "FILE", default_value = "data/scenarios/scenar2.json")]
    pub scenario: PathBuf,

    /// Append executed moves to this JSON-lines log (kept in memory otherwise)
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print situations as JSON
    #[arg(long)]
    pub json: bool,
}

/// One line of input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Advance,
    Move(EntityId),
    Turn(EntityId, Orientation),
    Ships,
    Situation,
    Help,
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
commands:
  start                 start the game
  advance | end         hand over to the next player / impulse
  move <id>             move a ship one hex straight ahead
  turn <id> <heading>   turn to an adjacent heading (NE E SE SW W NW) and move
  ships                 list both rosters
  situation             show the current situation
  help                  list commands
  quit                  leave the session";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// This function reads like a table of contents:
/// 1. Load reference tables and the scenario into a session
/// 2. Feed every input line to the session
pub fn run(args: PlayArgs) -> Result<()> {
    let mut engine = load_session(&args)?;

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    run_session(&mut engine, input, stdout.lock(), args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build the session, with a file-backed recorder when a log is requested
fn load_session(args: &PlayArgs) -> Result<Engine<Box<dyn MoveRecorder>>> {
    let data = args.tables.load()?;
    let scenario = load_scenario(&args.scenario)?;

    let recorder: Box<dyn MoveRecorder> = match &args.log {
        Some(path) => Box::new(
            FileRecorder::open_or_create(path)
                .with_context(|| format!("Failed to open move log: {}", path.display()))?,
        ),
        None => Box::new(MemoryRecorder::new()),
    };

    let engine = scenario
        .into_engine(&data.curves, data.impulses, recorder)
        .with_context(|| format!("Invalid scenario: {}", args.scenario.display()))?;

    tracing::info!(
        "Session loaded: scenario {} with {} ships",
        scenario.name,
        engine.all_ships().len()
    );

    Ok(engine)
}

/// Read commands until `quit` or end of input.
///
/// Bad commands and recording failures are reported and the session goes on.
pub fn run_session<R, I, W>(engine: &mut Engine<R>, input: I, mut out: W, json: bool) -> Result<()>
where
    R: MoveRecorder,
    I: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        if let Flow::Quit = execute(engine, command, &mut out, json)? {
            break;
        }
    }

    out.flush()?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Parse one input line. Headings are strict here: a typo is an error, not NE.
pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command");
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "advance" | "end" => Command::Advance,
        "move" => Command::Move(parse_ship_id(words.next())?),
        "turn" => {
            let id = parse_ship_id(words.next())?;
            let Some(heading) = words.next() else {
                bail!("missing heading");
            };
            Command::Turn(id, heading.to_ascii_uppercase().parse()?)
        }
        "ships" => Command::Ships,
        "situation" | "status" => Command::Situation,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument '{extra}'");
    }
    Ok(command)
}

fn execute<R: MoveRecorder, W: Write>(
    engine: &mut Engine<R>,
    command: Command,
    out: &mut W,
    json: bool,
) -> Result<Flow> {
    let situation = match command {
        Command::Start => engine.start_game(),
        Command::Advance => engine.advance_impulse(),
        Command::Move(id) => match engine.move_ship_straight(id) {
            Ok(situation) => situation,
            Err(e) => {
                writeln!(out, "error: move of ship {id} not recorded: {e}")?;
                engine.situation()
            }
        },
        Command::Turn(id, heading) => match engine.turn_ship(id, heading) {
            Ok(situation) => situation,
            Err(e) => {
                writeln!(out, "error: turn of ship {id} not recorded: {e}")?;
                engine.situation()
            }
        },
        Command::Ships => {
            write_ships(engine, out)?;
            return Ok(Flow::Continue);
        }
        Command::Situation => engine.situation(),
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };

    write_situation(&situation, out, json)?;
    Ok(Flow::Continue)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_ship_id(word: Option<&str>) -> Result<EntityId> {
    let Some(word) = word else {
        bail!("missing ship id");
    };
    word.parse().with_context(|| format!("bad ship id '{word}'"))
}

fn write_situation<W: Write>(situation: &Situation, out: &mut W, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(situation)?)?;
    } else {
        writeln!(
            out,
            "turn {} impulse {} {} | can act: {} | must move: {}",
            situation.current_turn,
            situation.current_impulse,
            situation.current_player,
            format_ids(&situation.can_act),
            format_ids(&situation.must_move)
        )?;
    }
    Ok(())
}

fn write_ships<R: MoveRecorder, W: Write>(engine: &Engine<R>, out: &mut W) -> Result<()> {
    for (player, ship) in engine.all_ships().iter() {
        let curve = ship.curve();
        writeln!(
            out,
            "{:<6} #{:<3} {:<24} {:<10} power {} speed {} turn {}",
            player.label(),
            ship.id(),
            ship.to_string(),
            ship.position().to_string(),
            curve.power,
            curve.speed,
            curve.turn_radius
        )?;
    }
    Ok(())
}

fn format_ids(ids: &[EntityId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

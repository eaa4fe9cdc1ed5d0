//! Integration tests for the impulse binary
//!
//! Runs the real executable against the reference files in `data/`.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use impulse_core::{read_log, HexPosition, Impulse, Orientation};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn data(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("data").join(file)
}

fn impulse(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_impulse"))
        .args(args)
        .arg("--ship-stats")
        .arg(data("ship_stats.json"))
        .arg("--impulses")
        .arg(data("impulses.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// PLAY
// ============================================================================

#[test]
fn test_play_writes_move_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("moves.jsonl");
    let scenario = data("scenarios/scenar2.json");

    let script = "start\nadvance\nadvance\nmove 0\nturn 1 NW\nmove 2\nadvance\nturn 4 SE\nquit\n";
    let output = impulse(
        &["play", "--scenario", scenario.to_str().unwrap(), "--log", log.to_str().unwrap()],
        script,
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    assert!(text.contains("turn 1 impulse B TERRAN | can act: 3 | must move: 3,4"));

    let records = read_log(&log).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].position, HexPosition::new(9, 11, Orientation::NE));
    assert_eq!(records[1].position, HexPosition::new(9, 11, Orientation::NW));
    assert_eq!(records[3].ship_id, 4);
    assert!(records.iter().all(|r| r.impulse == Impulse::B));
}

#[test]
fn test_second_session_on_same_log_keeps_first_moves() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("moves.jsonl");
    let scenario = data("scenarios/scenar2.json");
    let args = ["play", "--scenario", scenario.to_str().unwrap(), "--log", log.to_str().unwrap()];
    let script = "start\nadvance\nadvance\nmove 0\n";

    assert!(impulse(&args, script).status.success());
    let output = impulse(&args, script);
    assert!(output.status.success());
    assert!(stdout(&output).contains("error: move of ship 0 not recorded"));

    assert_eq!(read_log(&log).unwrap().len(), 1);
}

#[test]
fn test_play_json_output() {
    let output = impulse(&["play", "--scenario", data("scenarios/skirmish.json").to_str().unwrap(), "--json"], "start\n");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        r#"{"current_player":"TERRAN","can_act":[],"must_move":[],"current_impulse":"A","current_turn":1}"#
    );
}

// ============================================================================
// CHECK AND LOG
// ============================================================================

#[test]
fn test_check_reports_ships() {
    let output = impulse(&["check", "--scenario", data("scenarios/scenar2.json").to_str().unwrap()], "");
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Initiative: TALON"));
    assert!(text.contains("Terran CL Thor"));
}

#[test]
fn test_check_rejects_missing_scenario() {
    let output = impulse(&["check", "--scenario", "/nonexistent/scenario.json"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/scenario.json"));
}

#[test]
fn test_log_filters_by_ship() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("moves.jsonl");
    std::fs::write(
        &log,
        concat!(
            r#"{"ship_id":0,"turn":1,"impulse":"B","position":{"row":9,"col":11,"facing":"NE"}}"#,
            "\n",
            r#"{"ship_id":3,"turn":1,"impulse":"B","position":{"row":1,"col":5,"facing":"SW"}}"#,
            "\n",
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_impulse"))
        .args(["log", "--log", log.to_str().unwrap(), "--ship", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("1-5:SW"));
    assert!(!text.contains("9-11:NE"));
    assert!(text.contains("1 moves"));
}

#![cfg(feature = "cli")]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use common::{render_board, render_dots};

fn sudoku_grid() -> Command {
    Command::cargo_bin("sudoku-grid").expect("binary built")
}

#[test]
fn writes_all_requested_outputs() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("board.png");
    render_board(400, 400, 50, 300).save(&input).expect("save input");

    let rectified = dir.path().join("rectified.png");
    let overlay = dir.path().join("overlay.png");
    let report = dir.path().join("report.json");
    let cells = dir.path().join("cells");

    sudoku_grid()
        .arg(&input)
        .arg("--output")
        .arg(&rectified)
        .arg("--overlay")
        .arg(&overlay)
        .arg("--report")
        .arg(&report)
        .arg("--cells")
        .arg(&cells)
        .assert()
        .success();

    let board = image::open(&rectified).expect("rectified png").to_luma8();
    assert_eq!(board.width(), board.height());
    assert!((299..=301).contains(&board.width()), "side {}", board.width());

    let drawn = image::open(&overlay).expect("overlay png");
    assert_eq!((drawn.width(), drawn.height()), (400, 400));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).expect("report")).expect("json");
    assert_eq!(json["side"].as_u64(), Some(board.width() as u64));
    assert!(json["corners"]["top_left"].is_array() || json["corners"]["top_left"].is_object());
    assert!(json["edges"]["left"]["matched"].as_bool().unwrap_or(false));

    assert!(cells.join("cell_0_0.png").exists());
    assert!(cells.join("cell_8_8.png").exists());
}

#[test]
fn partial_config_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("board.png");
    render_board(400, 400, 50, 300).save(&input).expect("save input");
    let config = dir.path().join("params.json");
    std::fs::write(&config, r#"{ "merge": { "max_rho_delta": 15.0 } }"#).expect("config");

    sudoku_grid()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("board found"));
}

#[test]
fn image_without_board_fails_cleanly() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("dots.png");
    render_dots(300, 200).save(&input).expect("save input");

    sudoku_grid()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("board edges not found"));
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().expect("tempdir");
    sudoku_grid()
        .arg(dir.path().join("nope.png"))
        .assert()
        .failure();
}

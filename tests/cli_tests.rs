use std::time::Duration;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn play() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("play").expect("binary exists")
}

fn simulate() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("simulate").expect("binary exists")
}

#[test]
fn play_help_lists_the_variant_flags() {
    play()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--bruno").and(predicate::str::contains("--analyze")));
}

#[test]
fn quitting_immediately_is_clean() {
    play()
        .args(["--humans", "1", "--ai", "0", "--seed", "5"])
        .write_stdin("q\n")
        .timeout(Duration::from_secs(60))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exiting game."));
}

#[test]
fn all_computer_game_runs_to_completion() {
    play()
        .args(["--humans", "0", "--ai", "2", "--seed", "11"])
        .timeout(Duration::from_secs(120))
        .assert()
        .success()
        .stdout(predicate::str::contains("GAME OVER!").or(predicate::str::contains("game over")));
}

#[test]
fn saving_writes_a_snapshot_where_asked() {
    let dir = tempfile::tempdir().expect("temp dir");
    play()
        .args(["--humans", "1", "--ai", "1", "--seed", "9"])
        .current_dir(dir.path())
        .write_stdin("s\ncheckpoint\n")
        .timeout(Duration::from_secs(60))
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved."));
    assert!(dir.path().join("checkpoint.json").exists());
}

#[test]
fn simulate_reports_aggregate_stats() {
    simulate()
        .args(["--games", "3", "--players", "2", "--seed", "7"])
        .timeout(Duration::from_secs(120))
        .assert()
        .success()
        .stdout(predicate::str::contains("simulated 3 games"));
}

#[test]
fn simulate_rejects_bad_player_counts() {
    simulate()
        .args(["--games", "1", "--players", "5"])
        .assert()
        .failure();
}

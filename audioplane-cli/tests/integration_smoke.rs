//! Smoke tests for command wiring. None of these reach a database.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `audioplane` with no store settings and an empty home, so neither the
/// environment nor any .env file supplies credentials.
fn isolated(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("PGDATABASE")
        .env_remove("PGUSER")
        .env_remove("PGPASSWORD")
        .env_remove("PGSCHEMA")
        .env("AUDIOPLANE_QUIET", "1");
    cmd
}

// === Help Output ===

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("playlist-songs"))
        .stdout(predicate::str::contains("PGDATABASE"));
}

#[test]
fn test_view_help_lists_views() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("view").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("artist-song-counts"))
        .stdout(predicate::str::contains("likes-feed"));
}

#[test]
fn test_songs_insert_help() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("songs").arg("insert").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("YYYY-MM-DD"));
}

#[cfg(feature = "server")]
#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("audioplane"));
}

// === Input Validation ===

#[test]
fn test_unknown_table_rejected() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("list").arg("genres");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_non_numeric_id_rejected() {
    let mut cmd = Command::cargo_bin("audioplane").unwrap();
    cmd.arg("playlists").arg("delete").arg("abc");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must be an integer"));
}

#[test]
fn test_bad_release_date_rejected_before_connecting() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.args(["songs", "insert", "--name", "Test Song", "--released", "2024-13-01"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid song"))
        .stderr(predicate::str::contains("PGDATABASE").not());
}

#[test]
fn test_negative_song_count_rejected() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.args(["playlists", "insert", "--name", "Road Trip", "--num-songs", "-1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid playlist"));
}

// === Configuration ===

#[test]
fn test_missing_credentials_are_fatal() {
    let home = TempDir::new().unwrap();
    let mut cmd = isolated(&home);
    cmd.args(["list", "artists"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("PGDATABASE"));
}

#[test]
fn test_malformed_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".audioplane");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[display]\nrow_limit = \"lots\"\n").unwrap();

    let mut cmd = isolated(&home);
    cmd.args(["list", "users"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}

/// `isolated` plus credentials for a store nobody listens on.
fn unreachable(home: &TempDir, tuning: &str) -> Command {
    let dir = home.path().join(".audioplane");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), format!("[database]\n{}\n", tuning)).unwrap();

    let mut cmd = isolated(home);
    cmd.env("PGHOST", "127.0.0.1")
        .env("PGPORT", "1")
        .env("PGSSLMODE", "disable")
        .env("PGDATABASE", "music")
        .env("PGUSER", "nobody")
        .env("PGPASSWORD", "nothing");
    cmd
}

#[test]
fn test_unreachable_store_is_not_fatal() {
    let home = TempDir::new().unwrap();
    let mut cmd = unreachable(&home, "connect_timeout_secs = 1");
    cmd.args(["list", "artists", "--json"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("Database unavailable"));
}

#[test]
fn test_zero_statement_timeout_rejected() {
    let home = TempDir::new().unwrap();
    let mut cmd = unreachable(&home, "statement_timeout_ms = 0");
    cmd.args(["list", "artists"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("statement_timeout_ms"));
}

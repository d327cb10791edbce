use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("voicebox")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("speech synthesis"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("voicebox")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("voicebox"));
}

#[test]
fn test_help_lists_subcommands() {
    cargo_bin_cmd!("voicebox")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("say"))
        .stdout(predicate::str::contains("dataset"))
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("pipeline"));
}

// ============================================================================
// Missing-Input Tests
// ============================================================================

#[test]
fn test_say_with_empty_stdin_exits_with_usage() {
    cargo_bin_cmd!("voicebox")
        .arg("say")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input provided"));
}

#[test]
fn test_dataset_with_missing_phrase_list() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("voicebox")
        .current_dir(dir.path())
        .args(["dataset", "--phrases", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found or empty"));
}

#[test]
fn test_train_with_missing_dataset_folder() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("voicebox")
        .current_dir(dir.path())
        .args(["train", "--dataset", "absent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// Engine Failure Tests
// ============================================================================

#[test]
fn test_say_with_missing_engine_binary_reports_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("voicebox")
        .current_dir(dir.path())
        .env("CHATTERBOX_BIN", "definitely-not-a-real-binary")
        .args(["say", "hello", "there"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to spawn"));
}

use assert_cmd::prelude::*;

use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use std::process::Command;

/// Helper to create a Command for the `navigator` binary with a temporary data directory.
fn navigator_cmd(data_dir: &assert_fs::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("navigator").expect("binary exists");
  cmd.env("NAVIGATOR_DATA_DIR", data_dir.path());
  cmd.env("NO_COLOR", "1");
  // nothing in these tests may reach the network
  cmd.env("NAVIGATOR_HANSARD_URL", "http://127.0.0.1:9");
  cmd.env("NAVIGATOR_MEMBERS_URL", "http://127.0.0.1:9");
  cmd
}

#[test]
#[serial]
fn test_first_run_lists_default_topics() {
  let temp = assert_fs::TempDir::new().unwrap();

  navigator_cmd(&temp)
    .args(["topics", "list"])
    .assert()
    .success()
    .stdout(contains("Climate & Environment").and(contains("Healthcare")).and(contains("Economy")));

  assert!(temp.path().join("parliament-navigator-topics.json").exists());
  temp.close().unwrap();
}

#[test]
#[serial]
fn test_topic_add_edit_remove() {
  let temp = assert_fs::TempDir::new().unwrap();

  navigator_cmd(&temp)
    .args(["topics", "add", "Housing", "rent, mortgages, , RENT"])
    .assert()
    .success()
    .stdout(contains("Added topic"));

  navigator_cmd(&temp)
    .args(["topics", "edit", "2", "--name", "Health & Care"])
    .assert()
    .success()
    .stdout(contains("Updated topic"));

  navigator_cmd(&temp).args(["topics", "remove", "1"]).assert().success();

  navigator_cmd(&temp)
    .args(["topics", "list"])
    .assert()
    .success()
    .stdout(
      contains("Housing")
        .and(contains("rent, mortgages"))
        .and(contains("Health & Care"))
        .and(contains("Climate").not()),
    );

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_invalid_topic_is_rejected() {
  let temp = assert_fs::TempDir::new().unwrap();

  navigator_cmd(&temp)
    .args(["topics", "add", "Empty", " , "])
    .assert()
    .failure()
    .stderr(contains("At least one keyword is required"));

  navigator_cmd(&temp)
    .args(["topics", "edit", "2"])
    .assert()
    .failure()
    .stderr(contains("--name or --keywords"));

  navigator_cmd(&temp).args(["topics", "remove", "missing"]).assert().failure();

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_watchlist_starts_empty() {
  let temp = assert_fs::TempDir::new().unwrap();

  navigator_cmd(&temp)
    .args(["watchlist", "list"])
    .assert()
    .success()
    .stdout(contains("Your watchlist is empty."));

  navigator_cmd(&temp)
    .args(["watchlist", "remove", "172"])
    .assert()
    .failure()
    .stderr(contains("not on your watchlist"));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_unreachable_upstream_fails_cleanly() {
  let temp = assert_fs::TempDir::new().unwrap();

  navigator_cmd(&temp)
    .args(["--timeout-secs", "2", "search", "net zero"])
    .assert()
    .failure()
    .stderr(contains("Error"));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_unusable_data_dir_still_runs() {
  let temp = assert_fs::TempDir::new().unwrap();
  let blocker = temp.path().join("notadir");
  std::fs::write(&blocker, "x").unwrap();

  let run = |args: &[&str]| {
    let mut cmd = navigator_cmd(&temp);
    cmd.env("NAVIGATOR_DATA_DIR", blocker.join("sub"));
    cmd.args(args).assert()
  };

  run(&["topics", "list"]).success().stdout(contains("Climate & Environment"));
  run(&["watchlist", "list"]).success().stdout(contains("Your watchlist is empty."));
  run(&["topics", "add", "Housing", "rent"]).success().stdout(contains("Added topic"));

  temp.close().unwrap();
}

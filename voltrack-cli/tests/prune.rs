#![cfg(unix)]

use predicates::prelude::*;

mod common;

#[test]
fn test_prune_requires_confirmation() {
    let ctx = common::voltrack();

    ctx.new_cmd()
        .arg("prune")
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Are you sure"));

    assert!(ctx.docker_calls().is_empty());
}

#[test]
fn test_prune_with_confirmation() {
    let ctx = common::voltrack();

    ctx.new_cmd()
        .arg("prune")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("pruned"));

    assert_eq!(ctx.docker_calls(), vec!["volume prune --force"]);
}

#[test]
fn test_prune_force_skips_confirmation() {
    let ctx = common::voltrack();

    ctx.new_cmd()
        .args(["prune", "-f"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Are you sure").not());

    assert_eq!(ctx.docker_calls(), vec!["volume prune --force"]);
}

#[test]
fn test_prune_engine_failure() {
    let ctx = common::voltrack();
    ctx.fail_engine();

    ctx.new_cmd()
        .args(["prune", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot connect"));
}

#[test]
fn test_completion_hidden_but_works() {
    let ctx = common::voltrack();
    ctx.new_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("voltrack"));

    ctx.new_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("completion").not());
}

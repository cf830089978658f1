use crate::common::command::{
    branch_head, commit_file, current_branch, head_commit_id, init_repository_dir,
    run_gitlet_command, run_quietly,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn branch_points_at_head_without_switching(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_quietly(dir, &["branch", "dev"]);

    assert_eq!(current_branch(dir), "master");
    assert_eq!(branch_head(dir, "dev"), head_commit_id(dir));
}

#[rstest]
fn hierarchical_branch_names_are_accepted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_quietly(dir, &["branch", "feature/login"]);

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\nfeature/login\n*master\n\n",
        ));
}

#[rstest]
fn existing_branch_name_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);

    run_gitlet_command(dir, &["branch", "dev"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
#[case("bad..name")]
#[case(".hidden")]
#[case("trailing/")]
#[case("with space")]
#[case("release.lock")]
fn invalid_branch_names_are_refused(init_repository_dir: TempDir, #[case] name: &str) {
    run_gitlet_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout("Invalid branch name.\n");
}

#[rstest]
fn rm_branch_deletes_only_the_pointer(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "feature/dev"]);
    run_quietly(dir, &["checkout", "feature/dev"]);
    commit_file(dir, "b.txt", "b\n", "on dev");
    run_quietly(dir, &["checkout", "master"]);

    run_quietly(dir, &["rm-branch", "feature/dev"]);

    init_repository_dir
        .child(".gitlet/refs/heads/feature")
        .assert(predicate::path::missing());
    run_gitlet_command(dir, &["find", "on dev"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$").unwrap());
}

#[rstest]
#[case("dev")]
#[case("bad..name")]
fn rm_branch_of_a_missing_branch_is_refused(init_repository_dir: TempDir, #[case] name: &str) {
    run_gitlet_command(init_repository_dir.path(), &["rm-branch", name])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn rm_branch_of_the_current_branch_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");

    assert_eq!(current_branch(dir), "master");
}

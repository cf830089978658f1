use crate::common::command::{
    commit_file, current_branch, head_commit_id, init_repository_dir, run_gitlet_command,
    run_quietly,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_replaces_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "b.txt", "b\n", "add b");
    commit_file(dir, "a.txt", "dev a\n", "change a");

    run_quietly(dir, &["checkout", "master"]);

    assert_eq!(current_branch(dir), "master");
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");
    init_repository_dir
        .child("b.txt")
        .assert(predicate::path::missing());

    run_quietly(dir, &["checkout", "dev"]);

    assert_eq!(current_branch(dir), "dev");
    assert_eq!(read_file(&dir.join("a.txt")), "dev a\n");
    assert_eq!(read_file(&dir.join("b.txt")), "b\n");
}

#[rstest]
fn switching_branches_clears_the_stage(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    write_file(FileSpec::new(dir.join("s.txt"), "s\n".to_string()));
    run_quietly(dir, &["add", "s.txt"]);

    run_quietly(dir, &["checkout", "dev"]);

    run_gitlet_command(dir, &["commit", "nothing"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn checking_out_the_current_branch_is_refused(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");
}

#[rstest]
#[case("nope")]
#[case("bad..name")]
fn checking_out_a_missing_branch_is_refused(init_repository_dir: TempDir, #[case] branch: &str) {
    run_gitlet_command(init_repository_dir.path(), &["checkout", branch])
        .assert()
        .success()
        .stdout("No such branch exists.\n");
}

#[rstest]
fn untracked_file_in_the_way_blocks_the_switch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "b.txt", "dev b\n", "add b");
    run_quietly(dir, &["checkout", "master"]);
    let master_head = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("b.txt"), "local b\n".to_string()));

    run_gitlet_command(dir, &["checkout", "dev"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(current_branch(dir), "master");
    assert_eq!(head_commit_id(dir), master_head);
    assert_eq!(read_file(&dir.join("b.txt")), "local b\n");
    assert_eq!(read_file(&dir.join("a.txt")), "a\n");
}

#[rstest]
fn untracked_file_matching_the_target_is_not_in_the_way(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "b.txt", "same\n", "add b");
    run_quietly(dir, &["checkout", "master"]);

    write_file(FileSpec::new(dir.join("b.txt"), "same\n".to_string()));

    run_quietly(dir, &["checkout", "dev"]);
    assert_eq!(current_branch(dir), "dev");
}

#[rstest]
fn untracked_files_the_target_ignores_are_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    write_file(FileSpec::new(dir.join("scratch.txt"), "scratch\n".to_string()));

    run_quietly(dir, &["checkout", "dev"]);

    init_repository_dir
        .child("scratch.txt")
        .assert(predicate::path::missing());
}

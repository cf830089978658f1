use crate::common::command::{
    branch_head, commit_file, count_commits, current_branch, head_commit_id, init_repository_dir,
    run_gitlet_command, run_quietly,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merging_a_descendant_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "b.txt", "b\n", "add B");
    let dev_head = head_commit_id(dir);
    run_quietly(dir, &["checkout", "master"]);
    let commits_before = count_commits(dir);

    run_gitlet_command(dir, &["merge", "dev"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(branch_head(dir, "master"), dev_head);
    assert_eq!(head_commit_id(dir), dev_head);
    assert_eq!(current_branch(dir), "dev");
    assert_eq!(count_commits(dir), commits_before);
    assert_eq!(read_file(&dir.join("b.txt")), "b\n");
}

#[rstest]
fn merging_an_ancestor_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "old"]);
    commit_file(dir, "b.txt", "b\n", "add B");
    let master_head = head_commit_id(dir);
    let commits_before = count_commits(dir);

    run_gitlet_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(current_branch(dir), "master");
    assert_eq!(head_commit_id(dir), master_head);
    assert_eq!(count_commits(dir), commits_before);
    init_repository_dir
        .child("b.txt")
        .assert(predicate::path::exists());
}

#[rstest]
fn merging_a_branch_at_the_same_commit_is_an_ancestor_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "twin"]);

    run_gitlet_command(dir, &["merge", "twin"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(current_branch(dir), "master");
}

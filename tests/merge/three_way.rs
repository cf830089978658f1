use crate::common::command::{
    commit_file, count_commits, head_commit_id, init_repository_dir, run_gitlet_command,
    run_quietly,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// Diverged history
///
/// ```text
///        init (a.txt = "a", r.txt = "r")
///       /    \
///  master    dev
///  + b.txt   a.txt = "dev a", + c.txt, - r.txt
/// ```
#[fixture]
fn diverged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    commit_file(dir, "r.txt", "r\n", "add r");
    run_quietly(dir, &["branch", "dev"]);
    commit_file(dir, "b.txt", "b\n", "master adds b");

    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "a.txt", "dev a\n", "dev changes a");
    commit_file(dir, "c.txt", "c\n", "dev adds c");
    run_quietly(dir, &["rm", "r.txt"]);
    run_gitlet_command(dir, &["commit", "dev removes r"])
        .assert()
        .success();
    run_quietly(dir, &["checkout", "master"]);

    init_repository_dir
}

#[rstest]
fn clean_merge_combines_both_sides(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir.path();

    run_quietly(dir, &["merge", "dev"]);

    assert_eq!(read_file(&dir.join("a.txt")), "dev a\n");
    assert_eq!(read_file(&dir.join("b.txt")), "b\n");
    assert_eq!(read_file(&dir.join("c.txt")), "c\n");
    diverged_repository_dir
        .child("r.txt")
        .assert(predicate::path::missing());
}

#[rstest]
fn merge_commit_lists_the_given_head_first(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir.path();
    let master_head = head_commit_id(dir);
    let dev_head = crate::common::command::branch_head(dir, "dev");

    run_quietly(dir, &["merge", "dev"]);

    let merge_head = head_commit_id(dir);
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "===\ncommit {merge_head}\nMerge: {} {}\nDate: ",
            &dev_head[..7],
            &master_head[..7]
        )))
        .stdout(predicate::str::contains("\nMerged dev into master\n\n"));
}

#[rstest]
fn merge_leaves_a_clean_stage(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir.path();
    let commits_before = count_commits(dir);

    run_quietly(dir, &["merge", "dev"]);

    assert_eq!(count_commits(dir), commits_before + 1);
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ));
}

#[rstest]
fn merge_that_changes_nothing_is_not_committed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    commit_file(dir, "a.txt", "same\n", "master edit");
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "a.txt", "same\n", "dev edit");
    run_quietly(dir, &["checkout", "master"]);
    let head_before = head_commit_id(dir);

    run_gitlet_command(dir, &["merge", "dev"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    assert_eq!(head_commit_id(dir), head_before);
}

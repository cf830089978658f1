use crate::common::command::{gitlet_commit, init_repository_dir, run_gitlet_command, run_quietly};
use crate::common::file::{FileSpec, random_content, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_quietly(dir, &["rm", "a.txt"]);

    init_repository_dir
        .child("a.txt")
        .assert(predicate::path::missing());
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Removed Files ===\na.txt\n\n"));

    gitlet_commit(dir, "remove a")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    run_gitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
}

#[rstest]
fn removing_a_modified_tracked_file_unstages_and_deletes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "modified\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    run_quietly(dir, &["rm", "a.txt"]);

    init_repository_dir
        .child("a.txt")
        .assert(predicate::path::missing());
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Removed Files ===\na.txt\n\n"));
}

#[rstest]
fn removing_a_staged_file_only_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), random_content()));
    run_quietly(dir, &["add", "b.txt"]);

    run_quietly(dir, &["rm", "b.txt"]);

    init_repository_dir
        .child("b.txt")
        .assert(predicate::path::exists());
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Removed Files ===\n\n"));
}

#[rstest]
fn removing_an_unknown_file_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), random_content()));

    run_gitlet_command(dir, &["rm", "b.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");

    init_repository_dir
        .child("b.txt")
        .assert(predicate::path::exists());
}

use crate::common::command::{init_repository_dir, run_gitlet_command, run_quietly};
use crate::common::file::{FileSpec, random_content, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_is_refused(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn added_file_is_listed_as_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), random_content()));

    run_quietly(dir, &["add", "b.txt"]);

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("=== Staged Files ===\nb.txt\n\n"));
}

#[rstest]
fn re_adding_the_committed_version_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "changed\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    write_file(FileSpec::new(dir.join("a.txt"), "a\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    run_gitlet_command(dir, &["commit", "nothing"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn adding_a_removed_file_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["rm", "a.txt"]);

    write_file(FileSpec::new(dir.join("a.txt"), "a\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("=== Removed Files ===\n\n"))
        .stdout(predicates::str::contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn adding_an_unchanged_file_stages_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a\n".to_string()));
    let index_path = dir.join(".gitlet").join("index");
    let index_before = std::fs::read(&index_path).unwrap();

    run_quietly(dir, &["add", "a.txt"]);

    assert_eq!(std::fs::read(&index_path).unwrap(), index_before);
    run_gitlet_command(dir, &["commit", "noop"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

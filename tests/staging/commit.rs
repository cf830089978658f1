use crate::common::command::{
    count_commits, gitlet_commit, head_commit_id, init_repository_dir, repository_dir,
    run_gitlet_command, run_quietly,
};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_without_staged_changes_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head_before = head_commit_id(dir);

    gitlet_commit(dir, "empty")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    assert_eq!(head_commit_id(dir), head_before);
}

#[rstest]
fn commit_right_after_init_is_refused(repository_dir: TempDir) {
    run_quietly(repository_dir.path(), &["init"]);

    gitlet_commit(repository_dir.path(), "empty")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn empty_message_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head_before = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "changed\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    gitlet_commit(dir, "")
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");

    assert_eq!(head_commit_id(dir), head_before);
}

#[rstest]
fn whitespace_message_is_accepted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head_before = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "changed\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    gitlet_commit(dir, "   ")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_ne!(head_commit_id(dir), head_before);
    assert_eq!(count_commits(dir), 3);
}

#[rstest]
fn commit_advances_the_branch_and_clears_the_stage(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let parent = head_commit_id(dir);
    let files = write_generated_files(dir, 3);
    for file in &files {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        run_quietly(dir, &["add", &name]);
    }

    gitlet_commit(dir, "three files")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_ne!(head_commit_id(dir), parent);
    assert_eq!(count_commits(dir), 3);
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Untracked Files ===\n\n"));
}

#[cfg(unix)]
#[rstest]
fn file_names_with_newlines_can_be_committed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a\nb"), "split name\n".to_string()));
    run_quietly(dir, &["add", "a\nb"]);

    gitlet_commit(dir, "nl")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nnl\n"));
    std::fs::remove_file(dir.join("a\nb")).unwrap();
    run_quietly(dir, &["checkout", "--", "a\nb"]);
    assert_eq!(
        std::fs::read_to_string(dir.join("a\nb")).unwrap(),
        "split name\n"
    );
}

#[rstest]
fn message_may_start_with_a_dash(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "changed\n".to_string()));
    run_quietly(dir, &["add", "a.txt"]);

    gitlet_commit(dir, "-v is not a flag")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    run_gitlet_command(dir, &["find", "-v is not a flag"])
        .assert()
        .success()
        .stdout(format!("{}\n", head_commit_id(dir)));
}

#[rstest]
fn recommitting_in_the_same_directory_is_deterministic(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let mut ids = Vec::new();

    for _ in 0..2 {
        let _ = std::fs::remove_dir_all(dir.join(".gitlet"));
        run_quietly(dir, &["init"]);
        write_file(FileSpec::new(dir.join("a.txt"), "same\n".to_string()));
        run_quietly(dir, &["add", "a.txt"]);
        run_gitlet_command(dir, &["commit", "same"])
            .env("GITLET_COMMIT_DATE", "2024-03-01 12:00:00 +0900")
            .assert()
            .success();

        ids.push(head_commit_id(dir));
    }

    assert_eq!(ids[0], ids[1]);
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date: Fri Mar 1 12:00:00 2024 +0900"));
}

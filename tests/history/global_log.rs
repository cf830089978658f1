use crate::common::command::{commit_file, init_repository_dir, run_gitlet_command, run_quietly};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn global_log_lists_commits_from_every_branch_by_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "b.txt", "b\n", "on dev");
    run_quietly(dir, &["checkout", "master"]);
    commit_file(dir, "c.txt", "c\n", "on master");

    let output = run_gitlet_command(dir, &["global-log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).unwrap();

    for message in ["initial commit", "init", "on dev", "on master"] {
        assert!(output.contains(&format!("\n{message}\n\n")), "{message} missing");
    }

    let ids = output
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids.len(), 4);
    assert_eq!(ids, sorted);
}

#[rstest]
fn global_log_keeps_commits_of_deleted_branches(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);
    run_quietly(dir, &["checkout", "dev"]);
    commit_file(dir, "b.txt", "b\n", "on dev");
    run_quietly(dir, &["checkout", "master"]);
    run_quietly(dir, &["rm-branch", "dev"]);

    run_gitlet_command(dir, &["global-log"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\non dev\n\n"));
}

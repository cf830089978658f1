use crate::common::command::{init_repository_dir, run_gitlet_command, run_quietly};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn status_of(dir: &std::path::Path) -> String {
    let output = run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("status output is not UTF-8")
}

#[rstest]
fn clean_repository_lists_only_branches(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_quietly(dir, &["branch", "dev"]);

    assert_eq!(
        status_of(dir),
        "=== Branches ===\ndev\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );
}

#[rstest]
fn every_section_is_filled_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    for name in ["d.txt", "c.txt", "m.txt"] {
        write_file(FileSpec::new(dir.join(name), format!("{name}\n")));
        run_quietly(dir, &["add", name]);
    }
    // staged, then deleted from the working directory
    std::fs::remove_file(dir.join("d.txt")).unwrap();
    // staged, then changed again
    write_file(FileSpec::new(dir.join("m.txt"), "changed\n".to_string()));
    run_quietly(dir, &["rm", "a.txt"]);
    write_file(FileSpec::new(dir.join("z.txt"), "z\n".to_string()));
    write_file(FileSpec::new(dir.join("u.txt"), "u\n".to_string()));

    assert_eq!(
        status_of(dir),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\nc.txt\n\n\
         === Removed Files ===\na.txt\n\n\
         === Modifications Not Staged For Commit ===\nd.txt (deleted)\nm.txt (modified)\n\n\
         === Untracked Files ===\nu.txt\nz.txt\n\n"
    );
}

#[rstest]
fn subdirectories_are_ignored(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    write_file(FileSpec::new(dir.join("nested").join("n.txt"), "n\n".to_string()));

    assert_eq!(
        status_of(dir),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );
}

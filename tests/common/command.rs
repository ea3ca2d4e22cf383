use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_minibit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Initialized repository holding `a.txt` and `sub/b.txt`
#[fixture]
pub fn nested_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("a.txt"),
        "a".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("sub").join("b.txt"),
        "b".to_string(),
    ));

    init_repository_dir
}

pub fn run_minibit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minibit").expect("Failed to find minibit binary");
    cmd.env_remove("MINIBIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Pin both identities so that commit IDs are reproducible
pub fn with_fixed_identity(cmd: &mut Command) -> &mut Command {
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GIT_AUTHOR_DATE", AUTHOR_DATE),
        ("GIT_COMMITTER_NAME", AUTHOR_NAME),
        ("GIT_COMMITTER_EMAIL", AUTHOR_EMAIL),
        ("GIT_COMMITTER_DATE", AUTHOR_DATE),
    ])
}

pub fn minibit_commit_tree(dir: &Path, tree: &str, parent: Option<&str>, message: &str) -> Command {
    let mut args = vec!["commit-tree", tree];
    if let Some(parent) = parent {
        args.extend(["-p", parent]);
    }
    args.extend(["-m", message]);

    let mut cmd = run_minibit_command(dir, &args);
    with_fixed_identity(&mut cmd);
    cmd
}

/// The 40-hex ID printed by a successful command
pub fn output_oid(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    crate::common::stdout_of(&output)
}

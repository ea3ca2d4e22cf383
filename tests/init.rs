use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{init_repository_dir, repository_dir, run_minibit_command};

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let git_path = repository_dir.path().canonicalize()?.join(".git");

    run_minibit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Git repository in .+/\n$",
        )?)
        .stdout(predicate::str::contains(git_path.display().to_string()));

    assert!(git_path.join("objects").is_dir());
    assert!(git_path.join("refs").join("heads").is_dir());
    assert!(git_path.join("refs").join("tags").is_dir());
    assert_eq!(
        std::fs::read_to_string(git_path.join("HEAD"))?,
        "ref: refs/heads/main\n"
    );
    assert!(!git_path.join("refs").join("heads").join("main").exists());

    Ok(())
}

#[rstest]
fn init_repository_at_explicit_path(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("nested").join("project");

    run_minibit_command(repository_dir.path(), &["init", &target.display().to_string()])
        .assert()
        .success();

    assert!(target.join(".git").join("objects").is_dir());
    assert!(!repository_dir.path().join(".git").exists());

    Ok(())
}

#[rstest]
fn init_twice_fails_and_keeps_existing_state(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let git_path = init_repository_dir.path().join(".git");
    std::fs::write(init_repository_dir.path().join("hello.txt"), "Hello, world!\n")?;
    run_minibit_command(init_repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();
    let head_before = std::fs::read(git_path.join("HEAD"))?;

    run_minibit_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("fatal: repository already initialized"));

    assert_eq!(std::fs::read(git_path.join("HEAD"))?, head_before);
    assert!(
        git_path
            .join("objects")
            .join("af")
            .join("5626b4a114abcb82d63db7c8082c3c4756e51b")
            .is_file()
    );

    Ok(())
}

#[rstest]
#[case::write_tree(&["write-tree"])]
#[case::cat_file(&["cat-file", "-p", "af5626b4a114abcb82d63db7c8082c3c4756e51b"])]
#[case::ls_tree(&["ls-tree", "4b825dc642cb6eb9a060e54bf8d69288fbee4904"])]
fn commands_require_an_initialized_repository(repository_dir: TempDir, #[case] args: &[&str]) {
    run_minibit_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a repository"));
}

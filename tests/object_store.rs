use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use minibit::areas::repository::Repository;
use minibit::artifacts::objects::commit::{Author, Commit};
use minibit::artifacts::objects::entry_mode::{EntryMode, FileMode};
use minibit::artifacts::objects::object_id::ObjectId;
use minibit::errors::BitError;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;

use common::command::repository_dir;

#[fixture]
fn repository(repository_dir: TempDir) -> (TempDir, Repository) {
    let repository = Repository::new(repository_dir.path(), Box::new(std::io::sink()))
        .expect("Failed to open repository");
    repository.init().expect("Failed to initialize repository");

    (repository_dir, repository)
}

#[rstest]
fn hello_world_blob_has_the_known_digest(repository: (TempDir, Repository)) {
    let (_dir, repository) = repository;

    let oid = repository
        .database()
        .store_blob(&b"Hello, world!\n"[..])
        .unwrap();

    assert_eq!(oid.as_ref(), "af5626b4a114abcb82d63db7c8082c3c4756e51b");
    assert_eq!(
        repository.database().load_blob(&oid).unwrap().to_vec(),
        b"Hello, world!\n".to_vec()
    );
}

#[rstest]
fn snapshot_of_a_nested_directory(repository: (TempDir, Repository)) {
    let (dir, repository) = repository;
    dir.child("a.txt").write_str("a").unwrap();
    dir.child("sub").child("b.txt").write_str("b").unwrap();

    let root_oid = repository
        .workspace()
        .write_tree(repository.database())
        .unwrap();

    let root = repository.database().load_tree(&root_oid).unwrap();
    let root_entries = root
        .entries()
        .iter()
        .map(|entry| (entry.name.as_str(), entry.mode))
        .collect::<Vec<_>>();
    assert_eq!(
        root_entries,
        vec![
            ("a.txt", EntryMode::File(FileMode::Regular)),
            ("sub", EntryMode::Directory),
        ]
    );

    let sub = repository
        .database()
        .load_tree(&root.entries()[1].oid)
        .unwrap();
    assert_eq!(sub.entries().len(), 1);
    assert_eq!(sub.entries()[0].name, "b.txt");
}

#[rstest]
fn root_commit_round_trips(repository: (TempDir, Repository)) {
    let (_dir, repository) = repository;
    let tree_oid = repository.database().store_tree(Vec::new()).unwrap();
    let author = Author::now("Jane Doe", "jane@example.com");
    let commit = Commit::new(
        None,
        tree_oid.clone(),
        author.clone(),
        author,
        "Initial commit\n",
    );

    let commit_oid = repository.database().store_commit(&commit).unwrap();
    let loaded = repository.database().load_commit(&commit_oid).unwrap();

    assert_eq!(loaded.parent(), None);
    assert_eq!(loaded.tree_oid(), &tree_oid);
    assert_eq!(loaded.message(), "Initial commit\n");
}

#[rstest]
fn reading_an_unwritten_object_is_not_found(repository: (TempDir, Repository)) {
    let (_dir, repository) = repository;
    let oid = ObjectId::try_parse("0123456789abcdef0123456789abcdef01234567").unwrap();

    let result = repository.database().read(&oid);

    assert!(matches!(result, Err(BitError::ObjectNotFound(missing)) if missing == oid));
}

#[rstest]
fn second_init_fails_and_leaves_state_untouched(repository: (TempDir, Repository)) {
    let (dir, repository) = repository;
    let blob_oid = repository.database().store_blob(&b"keep me"[..]).unwrap();
    let head_before = std::fs::read(repository.refs().head_path()).unwrap();

    let reopened = Repository::new(dir.path(), Box::new(std::io::sink())).unwrap();
    let result = reopened.init();

    assert!(matches!(result, Err(BitError::AlreadyInitialized(_))));
    assert_eq!(std::fs::read(repository.refs().head_path()).unwrap(), head_before);
    assert_eq!(
        repository.database().load_blob(&blob_oid).unwrap().to_vec(),
        b"keep me".to_vec()
    );
}

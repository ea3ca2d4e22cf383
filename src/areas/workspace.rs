//! Working directory snapshots
//!
//! Turns a directory into tree objects bottom-up: files become blobs,
//! subdirectories become trees, and every child is stored before the tree
//! that references it.

use crate::areas::database::Database;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::errors::{BitError, BitResult};
use is_executable::IsExecutable;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const IGNORED_NAMES: [&str; 1] = [".git"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    /// Store root, skipped wherever it shows up during a snapshot
    git_path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>, git_path: Box<Path>) -> Self {
        Workspace { path, git_path }
    }

    pub fn read_file(&self, file_path: &Path) -> BitResult<Vec<u8>> {
        let file_path = self.path.join(file_path);

        std::fs::read(&file_path).map_err(BitError::io(format!(
            "Unable to read file {}",
            file_path.display()
        )))
    }

    /// Snapshot the whole working directory
    pub fn write_tree(&self, database: &Database) -> BitResult<ObjectId> {
        self.build(&self.path, database)
    }

    /// Store `dir_path` as a tree, recursively, and return the root tree ID
    ///
    /// Symbolic links and special files are rejected rather than skipped, so a
    /// snapshot never silently drops content.
    pub fn build(&self, dir_path: &Path, database: &Database) -> BitResult<ObjectId> {
        let entries = WalkDir::new(dir_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry))
            .map(|entry| {
                let entry = entry.map_err(|err| {
                    BitError::io(format!("Unable to list directory {}", dir_path.display()))(
                        err.into(),
                    )
                })?;
                self.build_entry(&entry, database)
            })
            .collect::<BitResult<Vec<TreeEntry>>>()?;

        let oid = database.store_tree(entries)?;
        debug!(oid = %oid, path = %dir_path.display(), "stored tree");

        Ok(oid)
    }

    fn build_entry(&self, entry: &DirEntry, database: &Database) -> BitResult<TreeEntry> {
        let path = entry.path();
        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| BitError::UnsupportedFileType {
                path: path.to_path_buf(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let oid = self.build(path, database)?;
            return Ok(TreeEntry::new(EntryMode::Directory, name, oid));
        }

        if file_type.is_file() {
            let content = std::fs::read(path).map_err(BitError::io(format!(
                "Unable to read file {}",
                path.display()
            )))?;
            let oid = database.store_blob(content)?;
            return Ok(TreeEntry::new(Self::file_mode(path).into(), name, oid));
        }

        let reason = if file_type.is_symlink() {
            "symbolic links are not supported"
        } else {
            "special files are not supported"
        };
        Err(BitError::UnsupportedFileType {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })
    }

    fn file_mode(path: &Path) -> FileMode {
        if path.is_executable() {
            FileMode::Executable
        } else {
            FileMode::Regular
        }
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_NAMES.contains(&name))
            || entry.path() == self.git_path.as_ref()
    }
}

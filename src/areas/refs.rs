//! References bootstrap
//!
//! Only what a fresh repository needs: the `refs/` hierarchy and a symbolic
//! `HEAD` pointing at an unborn branch. No ref-name resolution is performed.

use crate::errors::{BitError, BitResult};
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const SYMREF_PREFIX: &str = "ref: ";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the store root (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    /// Point `HEAD` at `refs/heads/<branch>` without creating the branch
    ///
    /// Refuses to replace an existing `HEAD`.
    pub fn create_head(&self, branch: &str) -> BitResult<()> {
        let head_path = self.head_path();

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&head_path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    BitError::AlreadyInitialized(self.path.to_path_buf())
                }
                _ => BitError::io(format!("Unable to create {}", head_path.display()))(err),
            })?;

        writeln!(file, "{SYMREF_PREFIX}refs/heads/{branch}")
            .map_err(BitError::io(format!("Unable to write {}", head_path.display())))
    }
}

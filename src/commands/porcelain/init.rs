use crate::areas::repository::Repository;
use crate::errors::{BitError, BitResult};
use std::fs;
use tracing::info;

const DEFAULT_BRANCH: &str = "main";

impl Repository {
    /// Create the store skeleton and a `HEAD` pointing at an unborn branch
    ///
    /// Fails without touching anything when a repository already exists.
    pub fn init(&self) -> BitResult<()> {
        if self.is_initialized() {
            return Err(BitError::AlreadyInitialized(self.git_path().to_path_buf()));
        }

        for dir in [
            self.database().objects_path().to_path_buf(),
            self.refs().heads_path(),
            self.refs().tags_path(),
        ] {
            fs::create_dir_all(&dir)
                .map_err(BitError::io(format!("Failed to create {}", dir.display())))?;
        }

        self.refs().create_head(DEFAULT_BRANCH)?;
        info!(path = %self.git_path().display(), branch = DEFAULT_BRANCH, "initialized repository");

        self.output(format!(
            "Initialized empty Git repository in {}/",
            self.git_path().display()
        ))
    }
}

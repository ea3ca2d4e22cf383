use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::{BitError, BitResult};
use std::cell::{RefCell, RefMut};
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Store root, relative to the working tree
pub const GIT_DIR: &str = ".git";

/// Context handle passed to every operation in place of global state
///
/// All areas derive their locations from the one working tree path given at
/// construction. Command output goes to the injected writer.
pub struct Repository {
    git_path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn Write>) -> BitResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            std::fs::create_dir_all(path)
                .map_err(BitError::io(format!("Unable to create {}", path.display())))?;
        }
        let path = path
            .canonicalize()
            .map_err(BitError::io(format!("Unable to resolve {}", path.display())))?;

        let git_path = path.join(GIT_DIR);
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.into_boxed_path(), git_path.clone().into_boxed_path());
        let refs = Refs::new(git_path.clone().into_boxed_path());

        Ok(Repository {
            git_path: git_path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Any trace of a previous bootstrap counts
    pub fn is_initialized(&self) -> bool {
        self.refs.head_path().exists() || self.database.objects_path().exists()
    }

    pub fn ensure_initialized(&self) -> BitResult<()> {
        if self.database.objects_path().is_dir() {
            Ok(())
        } else {
            Err(BitError::NotInitialized(self.database.objects_path().to_path_buf()))
        }
    }

    /// Write one line of command output
    pub fn output(&self, line: impl Display) -> BitResult<()> {
        writeln!(self.writer(), "{line}").map_err(BitError::io("Unable to write output"))
    }

    /// Write raw bytes of command output, unchanged
    pub fn output_bytes(&self, bytes: &[u8]) -> BitResult<()> {
        self.writer()
            .write_all(bytes)
            .map_err(BitError::io("Unable to write output"))
    }
}

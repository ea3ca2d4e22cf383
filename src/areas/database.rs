//! Loose object store
//!
//! Objects live at `objects/<first 2 hex chars>/<remaining 38 hex chars>`,
//! each file holding the zlib-compressed framed bytes. Stored objects are
//! never rewritten: a write for a digest that is already present is a no-op.

use crate::artifacts::compression;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::framing;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{BitError, BitResult};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles so that stores populated by `clone` can be fully inspected
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Frame, hash, compress and persist a payload, returning its object ID
    ///
    /// The ID is returned whether or not a new file was written.
    pub fn write(&self, object_type: ObjectType, payload: &[u8]) -> BitResult<ObjectId> {
        let framed = framing::frame(object_type, payload);
        let oid = framing::digest(&framed);
        let object_path = self.path.join(oid.to_path());

        if object_path.exists() {
            trace!(oid = %oid, "object already stored");
            return Ok(oid);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| BitError::malformed(format!("invalid object path {}", object_path.display())))?;
        std::fs::create_dir_all(object_dir).map_err(BitError::io(format!(
            "Unable to create object directory {}",
            object_dir.display()
        )))?;

        self.write_object(&object_path, &compression::compress(&framed)?)?;
        debug!(oid = %oid, kind = %object_type, size = payload.len(), "stored object");

        Ok(oid)
    }

    pub fn store(&self, object: &impl Object) -> BitResult<ObjectId> {
        self.write(object.object_type(), &object.serialize()?)
    }

    /// Locate, decompress and unframe an object
    pub fn read(&self, oid: &ObjectId) -> BitResult<(ObjectType, Bytes)> {
        let object_path = self
            .locate(oid)
            .ok_or_else(|| BitError::ObjectNotFound(oid.clone()))?;

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(BitError::ObjectNotFound(oid.clone()));
            }
            Err(err) => {
                return Err(BitError::io(format!(
                    "Unable to read object file {}",
                    object_path.display()
                ))(err));
            }
        };

        let (object_type, payload) = framing::unframe(compression::decompress(&compressed)?)?;
        trace!(oid = %oid, kind = %object_type, "read object");

        Ok((object_type, payload))
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.locate(oid).is_some()
    }

    pub fn object_type(&self, oid: &ObjectId) -> BitResult<ObjectType> {
        self.read(oid).map(|(object_type, _)| object_type)
    }

    /// Decode an object of whatever kind its header declares
    pub fn parse_object(&self, oid: &ObjectId) -> BitResult<ObjectBox> {
        let (object_type, payload) = self.read(oid)?;
        ObjectBox::from_payload(object_type, payload)
    }

    /// Decode an object that must be of kind `T`
    pub fn load<T: Unpackable>(&self, oid: &ObjectId) -> BitResult<T> {
        let (object_type, payload) = self.read(oid)?;

        if object_type != T::OBJECT_TYPE {
            return Err(BitError::UnexpectedType {
                oid: oid.clone(),
                expected: T::OBJECT_TYPE,
                actual: object_type,
            });
        }

        T::deserialize(payload)
    }

    pub fn store_blob(&self, content: impl Into<Bytes>) -> BitResult<ObjectId> {
        self.store(&Blob::new(content))
    }

    pub fn load_blob(&self, oid: &ObjectId) -> BitResult<Bytes> {
        self.load::<Blob>(oid).map(Blob::into_content)
    }

    pub fn store_tree(&self, entries: Vec<TreeEntry>) -> BitResult<ObjectId> {
        self.store(&Tree::new(entries))
    }

    pub fn load_tree(&self, oid: &ObjectId) -> BitResult<Tree> {
        self.load::<Tree>(oid)
    }

    /// Store a commit whose tree (and parent, if any) are already present
    pub fn store_commit(&self, commit: &Commit) -> BitResult<ObjectId> {
        self.expect_type(commit.tree_oid(), ObjectType::Tree)?;
        if let Some(parent) = commit.parent() {
            self.expect_type(parent, ObjectType::Commit)?;
        }

        self.store(commit)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> BitResult<Commit> {
        self.load::<Commit>(oid)
    }

    fn expect_type(&self, oid: &ObjectId, expected: ObjectType) -> BitResult<()> {
        let actual = self.object_type(oid)?;

        if actual != expected {
            return Err(BitError::UnexpectedType {
                oid: oid.clone(),
                expected,
                actual,
            });
        }

        Ok(())
    }

    /// Fan-out path first, then the flat `objects/<digest>` layout
    fn locate(&self, oid: &ObjectId) -> Option<PathBuf> {
        [self.path.join(oid.to_path()), self.path.join(oid.as_ref())]
            .into_iter()
            .find(|path| path.is_file())
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> BitResult<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| BitError::malformed(format!("invalid object path {}", object_path.display())))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .map_err(BitError::io(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            )))?;

        let written = file
            .write_all(object_content)
            .map_err(BitError::io(format!(
                "Unable to write object file {}",
                temp_object_path.display()
            )));
        drop(file);

        let persisted = written.and_then(|_| Self::persist(&temp_object_path, object_path));
        if persisted.is_err() {
            // abandoned temp files are unreachable by any object ID
            if let Err(err) = std::fs::remove_file(&temp_object_path) {
                warn!(path = %temp_object_path.display(), error = %err, "unable to remove temp object file");
            }
        }

        persisted
    }

    /// Make the temp file read-only, then rename it into place so readers never see a partial object
    fn persist(temp_object_path: &Path, object_path: &Path) -> BitResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp_object_path, std::fs::Permissions::from_mode(0o444))
                .map_err(BitError::io(format!(
                    "Unable to set permissions on {}",
                    temp_object_path.display()
                )))?;
        }

        std::fs::rename(temp_object_path, object_path).map_err(BitError::io(format!(
            "Unable to rename object file to {}",
            object_path.display()
        )))
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

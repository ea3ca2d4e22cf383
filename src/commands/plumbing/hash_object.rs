use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitResult;
use std::path::Path;

impl Repository {
    /// Print a file's blob ID, storing the blob only when `write` is set
    pub fn hash_object(&self, file: &Path, write: bool) -> BitResult<ObjectId> {
        let blob = Blob::new(self.workspace().read_file(file)?);

        let object_id = if write {
            self.ensure_initialized()?;
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        self.output(&object_id)?;

        Ok(object_id)
    }
}

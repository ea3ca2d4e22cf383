use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::BitResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Content: blobs and commits verbatim, trees as a listing
    Pretty,
    Type,
    Size,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> BitResult<()> {
        self.ensure_initialized()?;

        let object_id = ObjectId::try_parse(object_id)?;
        let (object_type, payload) = self.database().read(&object_id)?;

        match mode {
            CatFileMode::Type => self.output(object_type),
            CatFileMode::Size => self.output(payload.len()),
            CatFileMode::Pretty => match object_type {
                ObjectType::Blob | ObjectType::Commit => self.output_bytes(&payload),
                ObjectType::Tree => {
                    let tree = Tree::deserialize(payload)?;
                    if tree.is_empty() {
                        return Ok(());
                    }
                    self.output(tree.display())
                }
            },
        }
    }
}

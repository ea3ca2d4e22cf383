use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitResult;

impl Repository {
    pub fn write_tree(&self) -> BitResult<ObjectId> {
        self.ensure_initialized()?;

        let tree_id = self.workspace().write_tree(self.database())?;
        self.output(&tree_id)?;

        Ok(tree_id)
    }
}

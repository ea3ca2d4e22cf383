use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{BitError, BitResult};

impl Repository {
    /// List a tree's entries; a commit ID lists the commit's tree
    pub fn ls_tree(&self, object_id: &str, name_only: bool) -> BitResult<()> {
        self.ensure_initialized()?;

        let object_id = ObjectId::try_parse(object_id)?;
        let tree = match self.database().parse_object(&object_id)? {
            ObjectBox::Tree(tree) => tree,
            ObjectBox::Commit(commit) => self.database().load_tree(commit.tree_oid())?,
            ObjectBox::Blob(_) => {
                return Err(BitError::UnexpectedType {
                    oid: object_id,
                    expected: ObjectType::Tree,
                    actual: ObjectType::Blob,
                });
            }
        };

        if tree.is_empty() {
            return Ok(());
        }

        if name_only {
            for entry in tree.entries() {
                self.output(&entry.name)?;
            }
            Ok(())
        } else {
            self.output(tree.display())
        }
    }
}

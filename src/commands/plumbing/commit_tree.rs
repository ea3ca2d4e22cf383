use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit, Role};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitResult;
use tracing::info;

impl Repository {
    /// Record a snapshot as a commit
    ///
    /// Identities come from the `GIT_AUTHOR_*`/`GIT_COMMITTER_*` environment.
    /// No reference is moved: the new commit ID is only printed.
    pub fn commit_tree(
        &self,
        tree: &str,
        parent: Option<&str>,
        message: &str,
    ) -> BitResult<ObjectId> {
        self.ensure_initialized()?;

        let tree_oid = ObjectId::try_parse(tree)?;
        let parent = parent.map(ObjectId::try_parse).transpose()?;

        let mut message = message.to_string();
        if !message.ends_with('\n') {
            message.push('\n');
        }

        let author = Author::load_from_env(Role::Author)?;
        let committer = Author::load_from_env(Role::Committer)?;
        let commit = Commit::new(parent, tree_oid, author, committer, message);

        let commit_id = self.database().store_commit(&commit)?;
        info!(oid = %commit_id, tree = %commit.tree_oid(), "created commit");
        self.output(&commit_id)?;

        Ok(commit_id)
    }
}

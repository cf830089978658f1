use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::{Commit, commit_timestamp};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            anyhow::bail!(GitletError::EmptyMessage);
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        self.record_commit(&mut index, message.to_string(), None)?;

        Ok(())
    }

    /// Turn the staged changes into a child of HEAD and advance the current branch
    ///
    /// The commit object is stored before the branch ref moves, and the index
    /// is cleared and saved last.
    pub(crate) fn record_commit(
        &self,
        index: &mut Index,
        message: String,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<Commit> {
        if !index.exists() || index.is_clean() {
            anyhow::bail!(GitletError::NothingStaged);
        }

        let head = self.head_commit()?;
        let commit = Commit::child_of(&head, message, commit_timestamp(), index, second_parent);

        self.database().store(&commit)?;
        let current_branch = self.refs().current_branch()?;
        self.refs()
            .update_branch_head(&current_branch, commit.object_id())?;

        index.clear();
        index.write_updates()?;

        tracing::info!(
            branch = %current_branch,
            commit = %commit.object_id(),
            tracked = commit.tracked().len(),
            "recorded commit"
        );

        Ok(commit)
    }
}

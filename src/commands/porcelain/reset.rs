use crate::areas::repository::Repository;

impl Repository {
    /// Check out every file of a commit and move the current branch to it
    pub async fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_commit(revision)?;
        let target = self.database().load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let head = self.head_commit()?;
        self.migrate_working_tree(&head, &index, &target)?;

        index.clear();
        index.write_updates()?;

        let current_branch = self.refs().current_branch()?;
        self.refs().update_branch_head(&current_branch, &target_oid)?;
        tracing::debug!(branch = %current_branch, commit = %target_oid, "reset branch");

        Ok(())
    }
}

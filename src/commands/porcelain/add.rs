use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub async fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().file_path(file);
        if !self.workspace().exists(&path) {
            anyhow::bail!(GitletError::NoSuchFile);
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let head = self.head_commit()?;
        let blob = self.workspace().parse_blob(&path)?;

        if head.has_identical_content(&path, blob.object_id()) {
            // re-adding the committed version drops any pending change
            index.unstage(&path);
            index.unremove(&path);
        } else {
            self.database().store(&blob)?;
            index.add(path, blob.object_id().clone());
        }

        index.write_updates()?;

        Ok(())
    }
}

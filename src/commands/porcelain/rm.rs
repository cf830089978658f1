use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;

impl Repository {
    pub async fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().file_path(file);

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let head = self.head_commit()?;

        if head.is_tracked(&path) {
            index.remove(path.clone());
            index.write_updates()?;
            self.workspace().delete(&path)?;
        } else if index.is_staged(&path) {
            index.unstage(&path);
            index.write_updates()?;
        } else {
            anyhow::bail!(GitletError::NoReasonToRemove);
        }

        Ok(())
    }
}

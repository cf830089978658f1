use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let branches = self.refs().list_branches()?;
        let current_branch = self.refs().current_branch()?;
        let working_copies = self.workspace().hash_files()?;

        let status = StatusInfo::collect(&branches, &current_branch, &index, &working_copies);
        write!(self.writer(), "{status}")?;

        Ok(())
    }
}

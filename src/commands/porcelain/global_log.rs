use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;

impl Repository {
    /// Every stored commit, ordered by id
    pub async fn global_log(&mut self) -> anyhow::Result<()> {
        for commit in self.database().load_all_commits()? {
            write!(self.writer(), "{}", LogEntry::new(&commit))?;
        }

        Ok(())
    }
}

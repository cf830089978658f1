use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::RevList;

impl Repository {
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let head_oid = self.refs().read_head()?;

        for commit in RevList::new(self.database(), head_oid) {
            let commit = commit?;
            write!(self.writer(), "{}", LogEntry::new(&commit))?;
        }

        Ok(())
    }
}

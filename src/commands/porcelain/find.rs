use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub async fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let matching = self
            .database()
            .load_all_commits()?
            .into_iter()
            .filter(|commit| commit.message() == message)
            .collect::<Vec<_>>();

        if matching.is_empty() {
            anyhow::bail!(GitletError::NoMatchingCommit);
        }

        for commit in matching {
            writeln!(self.writer(), "{}", commit.object_id())?;
        }

        Ok(())
    }
}

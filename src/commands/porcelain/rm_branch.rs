use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::GitletError;

impl Repository {
    /// Delete a branch pointer; its commits stay in the store
    pub async fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        // a name that could never be created cannot exist either
        let name = BranchName::try_parse(name.to_string())
            .map_err(|_| GitletError::BranchMissing)?;

        let oid = self.refs().delete_branch(&name)?;
        tracing::debug!(branch = %name, commit = %oid, "deleted branch");

        Ok(())
    }
}

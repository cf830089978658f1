use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    pub async fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&name, &head_oid)?;
        tracing::debug!(branch = %name, commit = %head_oid, "created branch");

        Ok(())
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::GitletError;

impl Repository {
    /// Restore one file from HEAD, or from the commit named by `revision`
    ///
    /// The restored file is written over the working copy; the index is not
    /// touched.
    pub async fn checkout_file(&mut self, revision: Option<&str>, file: &str) -> anyhow::Result<()> {
        let commit = match revision {
            Some(prefix) => {
                let oid = self.database().resolve_commit(prefix)?;
                self.database().load_commit(&oid)?
            }
            None => self.head_commit()?,
        };

        let path = self.workspace().file_path(file);
        let Some(blob_oid) = commit.blob_for(&path) else {
            anyhow::bail!(GitletError::FileNotInCommit);
        };

        let blob = self.database().load_blob(blob_oid)?;
        self.workspace().overwrite(&path, blob.content())?;

        Ok(())
    }

    /// Switch to `name`, replacing the working tree with its head snapshot
    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = self.existing_branch(name)?;
        if self.refs().is_current_branch(&name)? {
            anyhow::bail!(GitletError::AlreadyOnBranch);
        }
        let Some(target_oid) = self.refs().read_branch(&name)? else {
            anyhow::bail!(GitletError::NoSuchBranch);
        };

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let head = self.head_commit()?;
        let target = self.database().load_commit(&target_oid)?;
        self.migrate_working_tree(&head, &index, &target)?;

        index.clear();
        index.write_updates()?;

        self.refs().set_current_branch(&name)?;
        tracing::debug!(branch = %name, commit = %target_oid, "switched branch");

        Ok(())
    }

    /// Parse a branch name that must refer to an existing branch
    pub(crate) fn existing_branch(&self, name: &str) -> anyhow::Result<BranchName> {
        match BranchName::try_parse(name.to_string()) {
            Ok(name) if self.refs().branch_exists(&name) => Ok(name),
            _ => anyhow::bail!(GitletError::NoSuchBranch),
        }
    }
}

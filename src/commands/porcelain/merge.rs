use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::untracked_in_the_way;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::merge::resolution::{MergeAction, conflict_content, plan_merge};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::path::Path;

impl Repository {
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if !index.is_clean() {
            anyhow::bail!(GitletError::UncommittedChanges);
        }
        let given_branch = self.existing_branch(branch)?;
        let current_branch = self.refs().current_branch()?;
        if given_branch == current_branch {
            anyhow::bail!(GitletError::MergeSelf);
        }

        let head = self.head_commit()?;
        let Some(given_oid) = self.refs().read_branch(&given_branch)? else {
            anyhow::bail!(GitletError::NoSuchBranch);
        };
        let given = self.database().load_commit(&given_oid)?;

        let working_copies = self.workspace().hash_files()?;
        if !untracked_in_the_way(&working_copies, &head, &index, &given).is_empty() {
            anyhow::bail!(GitletError::UntrackedInTheWay);
        }

        let split_oid = SplitPointFinder::new(|oid: &ObjectId| {
            Ok(self.database().load_commit(oid)?.to_slim())
        })
        .find_split_point(head.object_id(), given.object_id())?;

        if &split_oid == given.object_id() {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if &split_oid == head.object_id() {
            self.fast_forward(&mut index, &head, &given, &current_branch, &given_branch)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let mut conflicted = false;
        for (path, action) in plan_merge(&split, &head, &given) {
            match action {
                MergeAction::TakeGiven(blob_oid) => {
                    let blob = self.database().load_blob(&blob_oid)?;
                    self.workspace().overwrite(&path, blob.content())?;
                    index.add(path, blob_oid);
                }
                MergeAction::Remove => {
                    self.workspace().delete(&path)?;
                    index.remove(path);
                }
                MergeAction::Conflict { current, given } => {
                    let blob = self.write_conflict(&path, current.as_ref(), given.as_ref())?;
                    index.add(path, blob.object_id().clone());
                    conflicted = true;
                }
            }
        }

        let message = format!("Merged {given_branch} into {current_branch}");
        let merge_commit =
            self.record_commit(&mut index, message, Some(given.object_id().clone()))?;
        tracing::info!(
            split_point = %split_oid,
            commit = %merge_commit.object_id(),
            conflicted,
            "merged {given_branch} into {current_branch}"
        );

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Move to the given head when the current head is its ancestor
    ///
    /// Both the current branch and HEAD end up at the given head: the current
    /// branch ref is advanced and HEAD switches to the given branch.
    fn fast_forward(
        &self,
        index: &mut Index,
        head: &Commit,
        given: &Commit,
        current_branch: &BranchName,
        given_branch: &BranchName,
    ) -> anyhow::Result<()> {
        self.migrate_working_tree(head, index, given)?;

        index.clear();
        index.write_updates()?;

        self.refs()
            .update_branch_head(current_branch, given.object_id())?;
        self.refs().set_current_branch(given_branch)?;

        tracing::info!(
            from = %head.object_id(),
            to = %given.object_id(),
            "fast-forwarded {current_branch}"
        );

        Ok(())
    }

    /// Write the conflict file for `path` and store it as a blob
    fn write_conflict(
        &self,
        path: &Path,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> anyhow::Result<Blob> {
        let load_content = |oid: Option<&ObjectId>| -> anyhow::Result<Bytes> {
            match oid {
                Some(oid) => Ok(self.database().load_blob(oid)?.content().clone()),
                None => Ok(Bytes::new()),
            }
        };

        let content = conflict_content(&load_content(current)?, &load_content(given)?);
        self.workspace().overwrite(path, &content)?;

        let blob = Blob::new(path.to_path_buf(), Bytes::from(content));
        self.database().store(&blob)?;

        Ok(blob)
    }
}

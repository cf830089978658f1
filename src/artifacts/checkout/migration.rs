use crate::artifacts::objects::commit::{Commit, TrackedFiles};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// File operations that turn the working tree into a commit's snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    writes: TrackedFiles,
    deletes: BTreeSet<PathBuf>,
}

impl Migration {
    /// Plan the replacement of `working_files` by the files `target` tracks
    pub fn plan<'w>(target: &Commit, working_files: impl IntoIterator<Item = &'w PathBuf>) -> Self {
        let deletes = working_files
            .into_iter()
            .filter(|path| !target.is_tracked(path))
            .cloned()
            .collect();

        Migration {
            writes: target.tracked().clone(),
            deletes,
        }
    }

    pub fn writes(&self) -> &TrackedFiles {
        &self.writes
    }

    pub fn deletes(&self) -> &BTreeSet<PathBuf> {
        &self.deletes
    }
}

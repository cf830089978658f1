use crate::areas::index::Index;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::TrackedFiles;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    branches: Vec<String>,
    staged: Vec<String>,
    removed: Vec<String>,
    modified: Vec<String>,
    untracked: Vec<String>,
}

impl StatusInfo {
    /// Assemble the report from the branch list, the index and the current
    /// hash of every working file
    pub fn collect(
        branches: &[BranchName],
        current_branch: &BranchName,
        index: &Index,
        working_copies: &TrackedFiles,
    ) -> Self {
        let branches = branches
            .iter()
            .map(|branch| match branch == current_branch {
                true => format!("*{branch}"),
                false => branch.to_string(),
            })
            .collect();

        let mut staged = Vec::new();
        let mut deleted = Vec::new();
        let mut modified = Vec::new();
        for (path, staged_oid) in index.staged() {
            let name = file_name(path);
            match working_copies.get(path) {
                None => deleted.push(format!("{name} (deleted)")),
                Some(working_oid) if working_oid != staged_oid => {
                    modified.push(format!("{name} (modified)"))
                }
                Some(_) => staged.push(name),
            }
        }
        deleted.extend(modified);

        let removed = index.removed().iter().map(|path| file_name(path)).collect();

        let untracked = working_copies
            .keys()
            .filter(|path| !index.is_staged(path) && !index.is_tracked(path))
            .map(|path| file_name(path))
            .collect();

        StatusInfo {
            branches,
            staged,
            removed,
            modified: deleted,
            untracked,
        }
    }

    pub fn staged(&self) -> &[String] {
        &self.staged
    }

    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    pub fn modified(&self) -> &[String] {
        &self.modified
    }

    pub fn untracked(&self) -> &[String] {
        &self.untracked
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sections = [
            ("Branches", &self.branches),
            ("Staged Files", &self.staged),
            ("Removed Files", &self.removed),
            ("Modifications Not Staged For Commit", &self.modified),
            ("Untracked Files", &self.untracked),
        ];

        for (title, entries) in sections {
            writeln!(f, "=== {title} ===")?;
            for entry in entries {
                writeln!(f, "{entry}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

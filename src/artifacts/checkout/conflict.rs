use crate::areas::index::Index;
use crate::artifacts::objects::commit::{Commit, TrackedFiles};
use std::path::PathBuf;

/// Working files the repository does not know about
///
/// A file is untracked when HEAD does not track it (or its removal is
/// staged) and it is not staged for addition.
pub fn untracked_files<'w>(
    working_copies: &'w TrackedFiles,
    head: &Commit,
    index: &Index,
) -> impl Iterator<Item = &'w PathBuf> {
    working_copies.keys().filter(move |path| {
        let tracked_by_head = head.is_tracked(path) && !index.is_removed(path);
        !tracked_by_head && !index.is_staged(path)
    })
}

/// Untracked files whose content the target commit would overwrite
pub fn untracked_in_the_way(
    working_copies: &TrackedFiles,
    head: &Commit,
    index: &Index,
    target: &Commit,
) -> Vec<PathBuf> {
    untracked_files(working_copies, head, index)
        .filter(|path| {
            target
                .blob_for(path)
                .is_some_and(|target_oid| Some(target_oid) != working_copies.get(*path))
        })
        .cloned()
        .collect()
}

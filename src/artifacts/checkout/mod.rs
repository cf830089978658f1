//! Working-tree replacement
//!
//! Checking out a branch, resetting to a commit and fast-forwarding a merge
//! all replace the working tree with the files of a target commit:
//!
//! 1. Refuse when an untracked file would be clobbered
//! 2. Plan the writes (every target-tracked file) and deletions (every
//!    working file the target does not track)
//! 3. Apply the plan to the workspace
//!
//! All checks run before the first file is touched.

pub mod conflict;
pub mod migration;

//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: Create the repository with an initial commit on `master`
//! - `add`: Stage a file for the next commit
//! - `commit`: Record the staged changes
//! - `rm`: Unstage a file or stage its removal
//! - `log`: Show the first-parent history of the current branch
//! - `global_log`: Show every commit ever made
//! - `find`: Print the ids of commits with a given message
//! - `status`: Show branches, staged, removed, modified and untracked files
//! - `checkout`: Restore a file from a commit or switch branches
//! - `branch`: Create a branch
//! - `rm_branch`: Delete a branch
//! - `reset`: Move the current branch to a commit and check it out
//! - `merge`: Merge a branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;

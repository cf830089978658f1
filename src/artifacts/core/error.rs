//! User-facing error kinds
//!
//! Every variant renders as the single line of text shown to the user.
//! The front-end prints these on stdout and exits successfully; any other
//! error reaching `main` is treated as a fault and exits with a failure code.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitletError {
    #[error("File does not exist.")]
    NoSuchFile,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("More than one commit has the same id prefix.")]
    AmbiguousPrefix,
    #[error("Commit id should contain at least 4 characters.")]
    PrefixTooShort,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    BranchMissing,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,
    #[error("Invalid branch name.")]
    InvalidBranchName,
    #[error("No changes added to the commit.")]
    NothingStaged,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("Cannot merge a branch with itself.")]
    MergeSelf,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedInTheWay,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("Found no commit with that message.")]
    NoMatchingCommit,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("Incorrect operands.")]
    BadOperands,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Please enter a command.")]
    MissingCommand,
}

/// Find the user-facing error kind in an error chain, if any
pub fn user_error(error: &anyhow::Error) -> Option<&GitletError> {
    error.chain().find_map(|cause| cause.downcast_ref::<GitletError>())
}

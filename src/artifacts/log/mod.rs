//! Commit history for `log`, `global-log` and `find`
//!
//! - `rev_list`: first-parent walk from a commit back to the initial commit
//! - `log_entry`: the text block printed per commit

pub mod log_entry;
pub mod rev_list;

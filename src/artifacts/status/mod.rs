//! Repository status report
//!
//! Five sections, each sorted by name and followed by a blank line:
//!
//! - Branches, the current one marked with `*`
//! - Staged files whose working copy still matches the staged content
//! - Files staged for removal
//! - Staged files deleted or modified since staging
//! - Working files neither staged nor tracked by the index

pub mod status_info;

//! Gitlet data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch name validation
//! - `checkout`: Untracked-file safety check and working tree migrations
//! - `core`: Error kinds and the pager wrapper
//! - `index`: Binary format of the staging area file
//! - `log`: Commit history traversal
//! - `merge`: Split point discovery and three-way resolution
//! - `objects`: Object types (blob, commit) and identifiers
//! - `status`: Status report assembly

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;

//! Gitlet: a miniature version-control system
//!
//! Tracks the regular files of a single working directory, records snapshots
//! as commits linked into a history graph, supports named branches and merges
//! two branches with a three-way algorithm.
//!
//! - `areas`: the stateful parts of a repository (object store, index, refs, working tree)
//! - `artifacts`: value types and algorithms shared by the commands
//! - `commands`: user-facing operations, implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;

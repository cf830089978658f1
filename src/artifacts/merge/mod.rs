//! Three-way merge support
//!
//! - `split_point`: latest common first-parent ancestor of two commits
//! - `resolution`: per-path outcome of merging the given head into the current one

pub mod resolution;
pub mod split_point;

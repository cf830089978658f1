//! Command implementations
//!
//! Every user command is a method on [`Repository`](crate::areas::repository::Repository)
//! defined in its own module under `porcelain`. Commands report user errors
//! as [`GitletError`](crate::artifacts::core::error::GitletError) values and
//! write their regular output through the repository's writer.

pub mod porcelain;

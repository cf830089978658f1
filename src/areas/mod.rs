//! Core repository components
//!
//! This module contains the fundamental building blocks of a Gitlet repository:
//!
//! - `database`: Object store for blobs and commits
//! - `index`: Staging area for pending additions and removals
//! - `refs`: Branch references and HEAD
//! - `repository`: Context value coordinating the other areas
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;

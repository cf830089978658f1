//! Gitlet object types and operations
//!
//! Gitlet stores content as immutable objects identified by SHA-1 hashes:
//!
//! - **Blob**: The bytes of one working-directory file, together with its source path
//! - **Commit**: Snapshot with metadata (message, timestamp, parents, path-to-blob map)
//!
//! All objects implement serialization/deserialization for the on-disk format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Minimum length of an abbreviated commit id
pub const MIN_PREFIX_LENGTH: usize = 4;

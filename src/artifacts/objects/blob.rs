//! Blob object
//!
//! Blobs store the bytes of one working-directory file. The id covers both the
//! source path and the content, so identical bytes under two names are two blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<source path>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Immutable record of a file's bytes keyed by hash
#[derive(Debug, Clone)]
pub struct Blob {
    oid: ObjectId,
    source_path: PathBuf,
    content: Bytes,
}

impl Blob {
    pub fn new(source_path: PathBuf, content: Bytes) -> Self {
        let oid = Self::hash(&source_path, &content);

        Blob {
            oid,
            source_path,
            content,
        }
    }

    /// Hash a path and file content the way blob ids are computed
    ///
    /// Used to compare working-copy content against the index or a commit
    /// without creating a blob.
    pub fn hash(source_path: &Path, content: &[u8]) -> ObjectId {
        ObjectId::hash_of([source_path.to_string_lossy().as_bytes(), content])
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.oid == other.oid
    }
}

impl Eq for Blob {}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        content_bytes.write_all(self.source_path.to_string_lossy().as_bytes())?;
        content_bytes.push(0);
        content_bytes.write_all(&self.content)?;

        Ok(ObjectHeader::frame(self.object_type(), &content_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut source_path = Vec::new();
        reader.read_until(b'\0', &mut source_path)?;
        source_path
            .pop()
            .filter(|terminator| *terminator == 0)
            .context("Invalid blob object: missing source path")?;
        let source_path = PathBuf::from(String::from_utf8(source_path)?);

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(source_path, Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }
}

//! Object store
//!
//! Blobs live flat under `objects/<id>`, commits under the two-level fan-out
//! `commits/<id[0:2]>/<id[2:]>` so that they can be listed and looked up by
//! abbreviated id. Every object file is zlib-compressed and written through a
//! temporary file that is renamed into place. Writing an id that already
//! exists is a no-op.

use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const BLOBS_DIR: &str = "objects";
pub const COMMITS_DIR: &str = "commits";

#[derive(Debug)]
pub struct Database {
    /// Path to the repository metadata directory (`.gitlet`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(BLOBS_DIR)
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(COMMITS_DIR)
    }

    fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        match object_type {
            ObjectType::Blob => self.blobs_path().join(object_id.as_ref()),
            ObjectType::Commit => self.commits_path().join(object_id.to_path()),
        }
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<()> {
        let object_path = self.object_path(object.object_type(), object.object_id());

        // write the object to disk unless it already exists
        if object_path.exists() {
            tracing::trace!(oid = %object.object_id(), "object already stored");
            return Ok(());
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(&object_path, object.serialize()?)?;
        tracing::debug!(
            kind = %object.object_type(),
            oid = %object.object_id(),
            "stored object"
        );

        Ok(())
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;

        Blob::deserialize(object_reader)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        let commit = Commit::deserialize(object_reader)?;

        if commit.object_id() != object_id {
            anyhow::bail!(
                "Commit {} hashes to {}; the object is corrupt",
                object_id,
                commit.object_id()
            );
        }

        Ok(commit)
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.object_path(expected_type, object_id);
        let object_content = self.read_object(&object_path)?;
        let total_size = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let header = ObjectHeader::read_from(&mut object_reader)?;
        if header.object_type != expected_type {
            anyhow::bail!(
                "Object {object_id} is a {}, expected a {expected_type}",
                header.object_type
            );
        }
        let body_size = total_size - object_reader.position() as usize;
        if header.size != body_size {
            anyhow::bail!(
                "Object {object_id} declares {} bytes but holds {body_size}",
                header.size
            );
        }

        Ok(object_reader)
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// The first two characters name the fan-out directory and the rest is
    /// matched as a file name prefix.
    pub fn resolve_commit(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if prefix.len() < MIN_PREFIX_LENGTH {
            anyhow::bail!(GitletError::PrefixTooShort);
        }
        if prefix.len() > OBJECT_ID_LENGTH || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!(GitletError::NoSuchCommit);
        }

        let mut matches = self.find_commits_by_prefix(&prefix.to_ascii_lowercase())?;
        tracing::trace!(prefix, matches = matches.len(), "resolved commit prefix");

        match matches.len() {
            0 => anyhow::bail!(GitletError::NoSuchCommit),
            1 => Ok(matches.remove(0)),
            _ => anyhow::bail!(GitletError::AmbiguousPrefix),
        }
    }

    /// Find all commits whose id starts with the given prefix (2+ characters)
    fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.commits_path().join(dir_name);

        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }

    /// Every stored commit id, in ascending order
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.commits_path();

        let mut oids = WalkDir::new(&commits_path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&commits_path).ok()?;
                let oid = relative_path
                    .iter()
                    .map(|part| part.to_string_lossy())
                    .collect::<String>();

                ObjectId::try_parse(oid).ok()
            })
            .collect::<Vec<_>>();
        oids.sort();

        Ok(oids)
    }

    pub fn load_all_commits(&self) -> anyhow::Result<Vec<Commit>> {
        self.list_commit_ids()?
            .iter()
            .map(|oid| self.load_commit(oid))
            .collect()
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        std::fs::rename(&temp_object_path, object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

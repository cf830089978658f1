//! Working directory
//!
//! Only regular files directly under the root are considered; the metadata
//! directory and any other subdirectory are ignored. Paths handed out are
//! absolute (root joined with the file name), the form blob ids are
//! computed over.

use crate::areas::database::Database;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of a file named on the command line
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Regular files directly under the root, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list working directory {:?}", self.path))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|file_type| file_type.is_file()))
            .map(|entry| entry.path())
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Current blob id of every working-directory file
    pub fn hash_files(&self) -> anyhow::Result<TrackedFiles> {
        self.list_files()?
            .into_iter()
            .map(|path| {
                let oid = self.read_hash(&path)?;
                Ok((path, oid))
            })
            .collect()
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        file_path.is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let content = std::fs::read(file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        let content = self.read_file(file_path)?;

        Ok(Blob::new(file_path.to_path_buf(), content))
    }

    /// Hash the working copy the way its blob would be hashed
    pub fn read_hash(&self, file_path: &Path) -> anyhow::Result<ObjectId> {
        let content = self.read_file(file_path)?;

        Ok(Blob::hash(file_path, &content))
    }

    pub fn overwrite(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Remove the working copy; a missing file is not an error
    pub fn delete(&self, file_path: &Path) -> anyhow::Result<()> {
        match std::fs::remove_file(file_path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => {
                Err(error).with_context(|| format!("Failed to remove file: {:?}", file_path))
            }
        }
    }

    /// Write every planned file, then delete every planned removal
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        for (file_path, oid) in migration.writes() {
            let blob = database.load_blob(oid)?;
            self.overwrite(file_path, blob.content())?;
        }

        for file_path in migration.deletes() {
            self.delete(file_path)?;
        }

        tracing::debug!(
            written = migration.writes().len(),
            deleted = migration.deletes().len(),
            "working tree migrated"
        );

        Ok(())
    }
}

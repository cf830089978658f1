//! Staging area
//!
//! The index mediates between the working directory and the next commit. It
//! holds three collections:
//!
//! - `staged`: additions and updates not yet committed
//! - `removed`: deletions staged against the current HEAD
//! - `tracked`: every path the index has been told about; additive across
//!   adds and kept across commits, used by status to suppress untracked files
//!
//! `staged` and `removed` are always disjoint.
//!
//! ## Index File Format
//!
//! - Header: Signature, version, and entry count
//! - Entries: one per (collection, path) pair
//! - Checksum: SHA-1 hash of the entire index for integrity verification

use crate::artifacts::index::checksum::{ChecksumReader, ChecksumWriter};
use crate::artifacts::index::index_entry::{ENTRY_BLOCK, ENTRY_MIN_SIZE, EntryKind, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.gitlet/index`)
    path: Box<Path>,
    staged: TrackedFiles,
    removed: BTreeSet<PathBuf>,
    tracked: TrackedFiles,
    /// Index file header metadata
    header: IndexHeader,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            staged: TrackedFiles::new(),
            removed: BTreeSet::new(),
            tracked: TrackedFiles::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an index file has been written yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn staged(&self) -> &TrackedFiles {
        &self.staged
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.staged.contains_key(path)
    }

    pub fn is_removed(&self, path: &Path) -> bool {
        self.removed.contains(path)
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.tracked.contains_key(path)
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// No pending additions and no pending removals
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    /// Stage `path` with blob `oid`, cancelling any staged removal
    pub fn add(&mut self, path: PathBuf, oid: ObjectId) {
        self.removed.remove(&path);
        self.staged.insert(path.clone(), oid.clone());
        self.tracked.insert(path, oid);
        self.changed = true;
    }

    /// Stage the removal of `path`, cancelling any staged addition
    pub fn remove(&mut self, path: PathBuf) {
        self.staged.remove(&path);
        self.removed.insert(path);
        self.changed = true;
    }

    pub fn unstage(&mut self, path: &Path) {
        self.changed |= self.staged.remove(path).is_some();
    }

    pub fn unremove(&mut self, path: &Path) {
        self.changed |= self.removed.remove(path);
    }

    /// Drop every pending change; the tracked mirror is retained
    pub fn clear(&mut self) {
        self.staged.clear();
        self.removed.clear();
        self.changed = true;
    }

    fn reset(&mut self) {
        self.staged.clear();
        self.removed.clear();
        self.tracked.clear();
        self.header = IndexHeader::empty();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// Reads the index file, parses the header and entries, and verifies
    /// the checksum. A missing or empty file loads as an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        if !self.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        // if the index file is empty, return early
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = ChecksumReader::new(lock.deref_mut());
        let entries_count = self.parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()?;
        tracing::trace!(
            staged = self.staged.len(),
            removed = self.removed.len(),
            tracked = self.tracked.len(),
            "index loaded"
        );

        Ok(())
    }

    fn parse_header(&self, reader: &mut ChecksumReader<impl Read>) -> anyhow::Result<u32> {
        let header_bytes = reader.read_block(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    /// Parse all entries from the index file
    ///
    /// Reads each entry, handling variable-length paths with 8-byte alignment.
    fn parse_entries(
        &mut self,
        entries_count: u32,
        reader: &mut ChecksumReader<impl Read>,
    ) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let mut entry_bytes = reader.read_block(ENTRY_MIN_SIZE)?.to_vec();

            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes.extend_from_slice(&reader.read_block(ENTRY_BLOCK)?);
            }

            let entry = IndexEntry::deserialize(std::io::Cursor::new(Bytes::from(entry_bytes)))?;
            self.store_entry(entry)?;
        }

        self.header.entries_count = entries_count;

        Ok(())
    }

    fn store_entry(&mut self, entry: IndexEntry) -> anyhow::Result<()> {
        match (entry.kind, entry.oid) {
            (EntryKind::Removed, _) => {
                self.removed.insert(entry.name);
            }
            (EntryKind::Staged, Some(oid)) => {
                self.staged.insert(entry.name, oid);
            }
            (EntryKind::Tracked, Some(oid)) => {
                self.tracked.insert(entry.name, oid);
            }
            (kind, None) => {
                return Err(anyhow!(
                    "Index entry {:?} of kind {kind:?} has no object id",
                    entry.name
                ));
            }
        }

        Ok(())
    }

    fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        let staged = self
            .staged
            .iter()
            .map(|(path, oid)| IndexEntry::new(EntryKind::Staged, path.clone(), Some(oid.clone())));
        let removed = self
            .removed
            .iter()
            .map(|path| IndexEntry::new(EntryKind::Removed, path.clone(), None));
        let tracked = self
            .tracked
            .iter()
            .map(|(path, oid)| IndexEntry::new(EntryKind::Tracked, path.clone(), Some(oid.clone())));

        staged.chain(removed).chain(tracked)
    }

    /// Persist the index; a no-op unless something changed since loading
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.is_changed() {
            tracing::trace!("index unchanged, skipping write");
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = ChecksumWriter::new(lock.deref_mut());

        self.header = IndexHeader {
            entries_count: (self.staged.len() + self.removed.len() + self.tracked.len()) as u32,
            ..self.header.clone()
        };
        let header_bytes = self.header.serialize()?;
        writer.write_all(&header_bytes)?;

        let entries = self.entries().collect::<Vec<_>>();
        for entry in entries {
            writer.write_all(&entry.serialize()?)?;
        }

        writer.finish()?;
        self.changed = false;
        tracing::debug!(entries = self.header.entries_count, "index saved");

        Ok(())
    }
}

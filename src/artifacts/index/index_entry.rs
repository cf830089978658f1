//! Index entry representation
//!
//! Each entry records one path in one of the three index collections:
//! staged for addition, staged for removal, or tracked.
//!
//! ## Entry Format
//!
//! ```text
//! object id   20 bytes (all zero for removals)
//! flags        2 bytes (kind in the top two bits, path length in the low 12)
//! path         variable, NUL terminated, padded to 8-byte alignment
//! ```

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::cmp::min;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Maximum path length stored in the flags field
const MAX_PATH_SIZE: usize = 4095;

const OID_SIZE: usize = 20;
const FLAGS_SIZE: usize = 2;
const KIND_SHIFT: u16 = 14;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Minimum size of an index entry in bytes
pub const ENTRY_MIN_SIZE: usize = 24; // id, flags, one path byte and a NUL, padded

/// Which index collection an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Tracked,
    Staged,
    Removed,
}

impl EntryKind {
    fn as_bits(&self) -> u16 {
        match self {
            EntryKind::Tracked => 0,
            EntryKind::Staged => 1,
            EntryKind::Removed => 2,
        }
    }
}

impl TryFrom<u16> for EntryKind {
    type Error = anyhow::Error;

    fn try_from(bits: u16) -> anyhow::Result<Self> {
        match bits {
            0 => Ok(EntryKind::Tracked),
            1 => Ok(EntryKind::Staged),
            2 => Ok(EntryKind::Removed),
            _ => Err(anyhow!("Invalid index entry kind: {bits}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub kind: EntryKind,
    pub name: PathBuf,
    /// Blob id; removals carry none
    pub oid: Option<ObjectId>,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let entry_name = self
            .name
            .to_str()
            .ok_or_else(|| anyhow!("Invalid entry name"))?;
        let flags = (self.kind.as_bits() << KIND_SHIFT) | min(entry_name.len(), MAX_PATH_SIZE) as u16;

        let mut entry_bytes = Vec::new();
        match &self.oid {
            Some(oid) => oid.write_h40_to(&mut entry_bytes)?,
            None => entry_bytes.write_all(&[0; OID_SIZE])?,
        }
        entry_bytes.write_u16::<byteorder::NetworkEndian>(flags)?;
        entry_bytes.write_all(entry_name.as_bytes())?;

        // Ensure the entry bytes are padded to ENTRY_BLOCK size with null bytes
        entry_bytes.push(0); // There must be at least one null byte at the end
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_MIN_SIZE {
            return Err(anyhow!("Invalid index entry size"));
        }

        let flags = byteorder::NetworkEndian::read_u16(&bytes[OID_SIZE..OID_SIZE + FLAGS_SIZE]);
        let kind = EntryKind::try_from(flags >> KIND_SHIFT)?;
        let oid = match kind {
            EntryKind::Removed => None,
            _ => {
                let mut oid_bytes = std::io::Cursor::new(&bytes[0..OID_SIZE]);
                Some(ObjectId::read_h40_from(&mut oid_bytes)?)
            }
        };

        // Extract the entry name, which is null-terminated
        let name_start = OID_SIZE + FLAGS_SIZE;
        let name_end = bytes[name_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| anyhow!("Missing null terminator in entry name"))?;
        let name = std::str::from_utf8(&bytes[name_start..name_start + name_end])
            .map_err(|_| anyhow!("Invalid UTF-8 in entry name"))?;

        Ok(IndexEntry {
            kind,
            name: PathBuf::from(name),
            oid,
        })
    }
}

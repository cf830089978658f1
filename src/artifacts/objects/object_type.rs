//! Object framing
//!
//! Every stored object starts with `<type> <size>\0`, where `size` is the
//! byte length of the body that follows.

use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }
}

impl FromStr for ObjectType {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> anyhow::Result<Self> {
        match name {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => anyhow::bail!("Unknown object type {name:?}"),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    /// Prefix `body` with the header describing it
    pub fn frame(object_type: ObjectType, body: &[u8]) -> Bytes {
        let header = format!("{object_type} {}\0", body.len());

        Bytes::from([header.as_bytes(), body].concat())
    }

    /// Consume the header, leaving the reader at the start of the body
    pub fn read_from(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let object_type = Self::read_field(reader, b' ')?.parse()?;
        let size = Self::read_field(reader, b'\0')?
            .parse()
            .context("Object header has an invalid size")?;

        Ok(ObjectHeader::new(object_type, size))
    }

    fn read_field(reader: &mut impl BufRead, terminator: u8) -> anyhow::Result<String> {
        let mut field = Vec::new();
        reader.read_until(terminator, &mut field)?;

        if field.pop() != Some(terminator) {
            anyhow::bail!("Object header is truncated");
        }

        String::from_utf8(field).context("Object header is not valid UTF-8")
    }
}

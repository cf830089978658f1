//! SHA-1 trailers for the index file
//!
//! Every byte passing through either adapter is fed into a running digest.
//! The writer appends the digest when finished; the reader compares it with
//! the trailer stored after the last entry.

use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{self, Read, Write};

pub struct ChecksumReader<R> {
    inner: R,
    digest: Sha1,
}

impl<R: Read> ChecksumReader<R> {
    pub fn new(inner: R) -> Self {
        ChecksumReader {
            inner,
            digest: Sha1::new(),
        }
    }

    /// Read exactly `size` bytes
    pub fn read_block(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut block = vec![0; size];
        self.read_exact(&mut block)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading index"))?;

        Ok(Bytes::from(block))
    }

    /// Check the trailer against everything read so far
    pub fn verify(mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.inner
            .read_exact(&mut stored)
            .map_err(|_| anyhow!("Index is missing its checksum"))?;

        if stored != self.digest.finalize().as_slice() {
            return Err(anyhow!("Index checksum does not match value stored on disk"));
        }
        if self.inner.read(&mut [0u8; 1])? != 0 {
            return Err(anyhow!("Index has trailing bytes after its checksum"));
        }

        Ok(())
    }
}

impl<R: Read> Read for ChecksumReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.digest.update(&buf[..read]);

        Ok(read)
    }
}

pub struct ChecksumWriter<W> {
    inner: W,
    digest: Sha1,
}

impl<W: Write> ChecksumWriter<W> {
    pub fn new(inner: W) -> Self {
        ChecksumWriter {
            inner,
            digest: Sha1::new(),
        }
    }

    /// Append the trailer and hand back the underlying writer
    pub fn finish(mut self) -> anyhow::Result<W> {
        let checksum = self.digest.finalize();
        self.inner
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to index file"))?;
        self.inner.flush()?;

        Ok(self.inner)
    }
}

impl<W: Write> Write for ChecksumWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.digest.update(&buf[..written]);

        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

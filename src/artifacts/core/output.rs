//! Output sinks for history commands
//!
//! `log` and `global-log` can print far more than a screen. When stdout is
//! a terminal their output is collected into a [`minus`] pager and shown once
//! the command finishes; otherwise it goes straight to stdout. Setting
//! `NO_PAGER` always selects plain output.

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

pub enum Output {
    Plain,
    Paged(Pager),
}

impl Output {
    pub fn detect() -> Self {
        if std::env::var_os("NO_PAGER").is_none() && io::stdout().is_terminal() {
            Output::Paged(Pager::new())
        } else {
            Output::Plain
        }
    }

    /// A writer feeding this sink
    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Output::Plain => Box::new(io::stdout()),
            Output::Paged(pager) => Box::new(PagerWriter::new(pager.clone())),
        }
    }

    /// Hand collected output to the pager, blocking until it is closed
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Output::Plain => Ok(io::stdout().flush()?),
            Output::Paged(pager) => Ok(minus::page_all(pager)?),
        }
    }
}

/// `Write` adapter over a pager, which only accepts `str`
///
/// A write may end in the middle of a UTF-8 sequence; those trailing bytes
/// are held back until the rest arrives.
struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }

    fn push(&self, text: &str) -> io::Result<()> {
        self.pager.push_str(text).map_err(io::Error::other)
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let complete = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(error) if error.error_len().is_none() => error.valid_up_to(),
            Err(_) => {
                let text = String::from_utf8_lossy(&self.pending).into_owned();
                self.pending.clear();
                self.push(&text)?;
                return Ok(buf.len());
            }
        };

        let rest = self.pending.split_off(complete);
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending = rest;
        self.push(&text)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let text = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.push(&text)?;
        }

        Ok(())
    }
}

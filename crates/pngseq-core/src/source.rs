//! Byte sources feeding the codec engine.
//!
//! A [`ByteSource`] is either an open file or an in-memory blob with a
//! cursor. Both are checked for the PNG signature when constructed, before
//! any engine state or buffer exists.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::CodecError;

/// Number of signature bytes compared on open.
pub const SIGNATURE_LEN: usize = 4;

/// Leading bytes of every PNG stream (the first half of the 8-byte signature).
pub const SIGNATURE: [u8; SIGNATURE_LEN] = [0x89, b'P', b'N', b'G'];

fn check_signature(prefix: &[u8]) -> Result<(), CodecError> {
    if prefix.len() < SIGNATURE_LEN {
        return Err(CodecError::InvalidFormat(format!(
            "need at least {} bytes, got {}",
            SIGNATURE_LEN,
            prefix.len()
        )));
    }
    if prefix[..SIGNATURE_LEN] != SIGNATURE {
        return Err(CodecError::InvalidFormat("signature mismatch".to_string()));
    }
    Ok(())
}

/// In-memory blob with an explicit read cursor.
#[derive(Debug, Clone)]
pub struct MemorySource<'a> {
    data: Cow<'a, [u8]>,
    offset: usize,
}

impl<'a> MemorySource<'a> {
    /// Wrap a borrowed or owned blob, validating its signature without
    /// moving the cursor.
    pub fn new(data: impl Into<Cow<'a, [u8]>>) -> Result<Self, CodecError> {
        let data = data.into();
        check_signature(&data)?;
        Ok(Self { data, offset: 0 })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Fill `out` completely from the cursor, or fail without moving it.
    pub fn pull(&mut self, out: &mut [u8]) -> Result<(), CodecError> {
        let end = self
            .offset
            .checked_add(out.len())
            .filter(|end| *end <= self.data.len())
            .ok_or(CodecError::TruncatedInput {
                offset: self.offset,
                requested: out.len(),
                size: self.data.len(),
            })?;
        out.copy_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(())
    }
}

impl Read for MemorySource<'_> {
    /// Engine-facing pull. Reads are clamped to what remains; asking for
    /// bytes once nothing remains is a `TruncatedInput` failure carried
    /// inside the `io::Error`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = buf.len().min(self.remaining());
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                CodecError::TruncatedInput {
                    offset: self.offset,
                    requested: buf.len(),
                    size: self.data.len(),
                },
            ));
        }
        buf[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
        self.offset += n;
        Ok(n)
    }
}

impl Seek for MemorySource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => i128::from(n),
            SeekFrom::End(delta) => self.data.len() as i128 + i128::from(delta),
            SeekFrom::Current(delta) => self.offset as i128 + i128::from(delta),
        };
        if target < 0 || target > self.data.len() as i128 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek outside the memory source",
            ));
        }
        self.offset = target as usize;
        Ok(self.offset as u64)
    }
}

/// Readable input for a single decode call.
#[derive(Debug)]
pub enum ByteSource<'a> {
    File(File),
    Memory(MemorySource<'a>),
}

impl<'a> ByteSource<'a> {
    /// Open `path`, check its signature, and rewind to the start so the
    /// engine sees the whole stream.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut header = [0u8; SIGNATURE_LEN];
        if let Err(e) = file.read_exact(&mut header) {
            return Err(match e.kind() {
                io::ErrorKind::UnexpectedEof => CodecError::InvalidFormat(format!(
                    "{} is shorter than the PNG signature",
                    path.display()
                )),
                _ => e.into(),
            });
        }
        check_signature(&header)?;
        file.seek(SeekFrom::Start(0))?;
        Ok(ByteSource::File(file))
    }

    /// Borrow or take ownership of an in-memory PNG.
    pub fn from_memory(data: impl Into<Cow<'a, [u8]>>) -> Result<Self, CodecError> {
        MemorySource::new(data).map(ByteSource::Memory)
    }

    /// Fill `out` completely or fail.
    pub fn pull(&mut self, out: &mut [u8]) -> Result<(), CodecError> {
        match self {
            ByteSource::File(file) => file.read_exact(out).map_err(CodecError::from),
            ByteSource::Memory(mem) => mem.pull(out),
        }
    }
}

impl Read for ByteSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ByteSource::File(file) => file.read(buf),
            ByteSource::Memory(mem) => mem.read(buf),
        }
    }
}

impl Seek for ByteSource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            ByteSource::File(file) => file.seek(pos),
            ByteSource::Memory(mem) => mem.seek(pos),
        }
    }
}

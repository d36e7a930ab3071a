//! Chunk decoder — walk the chunk area into an ordered list of records.
//!
//! # How it works
//!
//! Starting at the current stream position (normally `HEADER_SIZE`), the
//! decoder reads `[length][type][payload][crc]` records back to back.  There
//! is no padding, so each record's offset is the previous offset plus
//! `12 + length`.  Decoding ends in exactly one of three ways:
//!
//! | Stop | Meaning |
//! |------|---------|
//! | `Terminal` | An `IEND` chunk was read; anything after it is ignored |
//! | `Truncated` | The stream ended inside a record, or before any `IEND` |
//! | `Failed` | A read returned a non-EOF I/O error |
//!
//! Only `Terminal` is a complete sequence.  In the other two cases the
//! chunks read so far are still returned; the caller decides what to do with
//! them.  The decoder never checks CRCs and never looks inside payloads.

use byteorder::{BigEndian, ReadBytesExt};
use std::fmt;
use std::io::{self, Read, Seek};

use crate::chunk::{Chunk, ChunkType, CHUNK_OVERHEAD};

/// Why decoding ended.
#[derive(Debug)]
pub enum DecodeStop {
    /// The terminal chunk was read.
    Terminal,
    /// The stream ran out inside (or in place of) the record at `offset`.
    Truncated { offset: u64 },
    /// Reading the record at `offset` failed.
    Failed { offset: u64, error: io::Error },
}

impl DecodeStop {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DecodeStop::Terminal)
    }
}

impl fmt::Display for DecodeStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStop::Terminal => f.write_str("terminal chunk reached"),
            DecodeStop::Truncated { offset } => write!(f, "stream truncated at offset {offset:#x}"),
            DecodeStop::Failed { offset, error } => write!(f, "read failed at offset {offset:#x}: {error}"),
        }
    }
}

/// Result of a full decode pass.
#[derive(Debug)]
pub struct Decoded {
    /// Every record read before decoding stopped, in file order.
    pub chunks: Vec<Chunk>,
    pub stop:   DecodeStop,
}

impl Decoded {
    /// `true` only when the sequence ended on the terminal chunk.
    pub fn completed(&self) -> bool {
        self.stop.is_terminal()
    }
}

/// Streaming, single-pass chunk iterator.
///
/// Once it stops (terminal chunk or failure) it stays stopped; the reason is
/// available from [`ChunkReader::stop`].
pub struct ChunkReader<R: Read + Seek> {
    reader:   R,
    /// Offset of the next record's length field.
    position: u64,
    stop:     Option<DecodeStop>,
}

impl<R: Read + Seek> ChunkReader<R> {
    /// Start decoding at the reader's current position.
    pub fn new(mut reader: R) -> io::Result<Self> {
        let position = reader.stream_position()?;
        Ok(Self { reader, position, stop: None })
    }

    /// `None` while the iterator can still yield chunks.
    pub fn stop(&self) -> Option<&DecodeStop> {
        self.stop.as_ref()
    }

    /// Drain the remaining chunks and return them with the stop reason.
    pub fn finish(mut self) -> Decoded {
        let chunks: Vec<Chunk> = self.by_ref().collect();
        let stop = self.stop.unwrap_or(DecodeStop::Truncated { offset: self.position });
        Decoded { chunks, stop }
    }

    fn read_chunk(&mut self) -> Result<Chunk, DecodeStop> {
        let offset = self.position;
        let classify = |error: io::Error| match error.kind() {
            io::ErrorKind::UnexpectedEof => DecodeStop::Truncated { offset },
            _ => DecodeStop::Failed { offset, error },
        };

        let length = self.reader.read_u32::<BigEndian>().map_err(classify)?;

        let mut tag = [0u8; 4];
        self.reader.read_exact(&mut tag).map_err(classify)?;

        // Bounded read: a corrupt length must not pre-allocate gigabytes.
        let mut data = Vec::new();
        self.reader
            .by_ref()
            .take(length as u64)
            .read_to_end(&mut data)
            .map_err(classify)?;
        if data.len() as u64 != length as u64 {
            return Err(DecodeStop::Truncated { offset });
        }

        let crc = self.reader.read_u32::<BigEndian>().map_err(classify)?;

        self.position = offset + CHUNK_OVERHEAD + length as u64;
        Ok(Chunk { offset, length, chunk_type: ChunkType(tag), data, crc })
    }
}

impl<R: Read + Seek> Iterator for ChunkReader<R> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.stop.is_some() {
            return None;
        }
        match self.read_chunk() {
            Ok(chunk) => {
                log::debug!("decoded {chunk}");
                if chunk.is_terminal() {
                    self.stop = Some(DecodeStop::Terminal);
                }
                Some(chunk)
            }
            Err(stop) => {
                log::warn!("chunk decoding stopped: {stop}");
                self.stop = Some(stop);
                None
            }
        }
    }
}

impl<R: Read + Seek> std::iter::FusedIterator for ChunkReader<R> {}

/// Decode every chunk from the reader's current position onward.
///
/// Structural problems end the walk and are reported in [`Decoded::stop`];
/// only a failure to query the stream position is returned as `Err`.
pub fn decode<R: Read + Seek>(reader: &mut R) -> io::Result<Decoded> {
    Ok(ChunkReader::new(reader)?.finish())
}

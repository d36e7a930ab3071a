//! Integrity corrector — rewrite a chunk's stored CRC in place.
//!
//! The only bytes ever written are the four CRC bytes at
//! [`Chunk::crc_offset`].  File length, length fields, type tags and payloads
//! are left alone.  No read-back is done after the write.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Seek, SeekFrom, Write};

use crate::chunk::Chunk;

/// Outcome of comparing a chunk's stored CRC with its computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Mismatch { stored: u32, expected: u32 },
}

/// Check a chunk without touching the stream.
pub fn verify(chunk: &Chunk) -> Verdict {
    let expected = chunk.computed_crc();
    if expected == chunk.crc {
        Verdict::Valid
    } else {
        Verdict::Mismatch { stored: chunk.crc, expected }
    }
}

/// Rewrite the chunk's CRC if it is wrong.  Returns `true` when a write
/// happened.
pub fn correct<W: Write + Seek>(stream: &mut W, chunk: &Chunk) -> io::Result<bool> {
    match verify(chunk) {
        Verdict::Valid => Ok(false),
        Verdict::Mismatch { stored, expected } => {
            let at = chunk.crc_offset();
            stream.seek(SeekFrom::Start(at))?;
            stream.write_u32::<BigEndian>(expected)?;
            log::info!(
                "rewrote {} CRC at {at:#x}: {stored:08X} -> {expected:08X}",
                chunk.chunk_type
            );
            Ok(true)
        }
    }
}

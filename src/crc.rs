//! Chunk CRC — CRC-32/ISO-HDLC over `type ++ payload`.
//!
//! `crc32fast` carries its lookup tables as compile-time constants, so there
//! is no table to build or cache at runtime.

use crc32fast::Hasher;

/// CRC of a chunk: type tag followed by payload.  The length field is not
/// covered.
pub fn chunk_crc(chunk_type: &[u8; 4], payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(chunk_type);
    hasher.update(payload);
    hasher.finalize()
}

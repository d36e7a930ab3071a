//! Format gate — decide whether a file is a PNG container at all.
//!
//! The gate only looks at the leading bytes.  A file that fails it is a
//! routing decision, not an error: neither the decoder nor the corrector
//! runs on it.

use std::io::{self, Read, Seek, SeekFrom};

/// Full 8-byte PNG signature.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
/// Size of the fixed header; the chunk area starts here.
pub const HEADER_SIZE: usize = 8;
/// Offset of the magic bytes inspected by the gate.
pub const GATE_OFFSET: usize = 1;
/// Magic bytes expected at [`GATE_OFFSET`].
pub const GATE_MAGIC: &[u8; 3] = b"PNG";

/// `true` when `prefix` carries the PNG magic at [`GATE_OFFSET`].
///
/// Only the ASCII `PNG` run is compared; the surrounding signature bytes are
/// not checked, so files whose line-ending bytes were mangled in transit are
/// still accepted.
pub fn is_candidate(prefix: &[u8]) -> bool {
    prefix
        .get(GATE_OFFSET..GATE_OFFSET + GATE_MAGIC.len())
        .is_some_and(|magic| magic == GATE_MAGIC)
}

/// Read up to [`HEADER_SIZE`] bytes from the start of `reader`.
///
/// Short files yield a short prefix rather than an error.
pub fn read_prefix<R: Read + Seek>(reader: &mut R) -> io::Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(0))?;
    let mut prefix = Vec::with_capacity(HEADER_SIZE);
    reader.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut prefix)?;
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_full_signature() {
        assert!(is_candidate(&SIGNATURE));
    }

    #[test]
    fn accepts_mangled_line_endings() {
        let mut sig = SIGNATURE;
        sig[4] = b'\n';
        sig[5] = b'\n';
        assert!(is_candidate(&sig));
    }

    #[test]
    fn rejects_other_magic() {
        assert!(!is_candidate(b"GIF89a\0\0"));
        assert!(!is_candidate(b"\x89png\r\n\x1a\n"));
    }

    #[test]
    fn rejects_short_prefix() {
        assert!(!is_candidate(b""));
        assert!(!is_candidate(b"\x89PN"));
    }

    #[test]
    fn read_prefix_handles_short_stream() {
        let mut cur = Cursor::new(b"\x89PN".to_vec());
        cur.set_position(2);
        assert_eq!(read_prefix(&mut cur).unwrap(), b"\x89PN");
    }

    #[test]
    fn read_prefix_stops_at_header() {
        let mut data = SIGNATURE.to_vec();
        data.extend_from_slice(&[0xAA; 32]);
        let mut cur = Cursor::new(data);
        assert_eq!(read_prefix(&mut cur).unwrap(), SIGNATURE);
    }
}

#![allow(dead_code)]

use pngcrc::{Chunk, ChunkType, SIGNATURE};

/// Assemble a PNG from `(type, payload)` pairs with correct CRCs.
pub fn build_png(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    for (tag, data) in chunks {
        let offset = out.len() as u64;
        Chunk::new(offset, ChunkType::from(**tag), data.to_vec()).unwrap().write_to(&mut out).unwrap();
    }
    out
}

/// A small but realistic container: IHDR, a text chunk, two IDATs, IEND.
pub fn sample_png() -> Vec<u8> {
    build_png(&[
        (b"IHDR", &[0, 0, 0, 16, 0, 0, 0, 16, 8, 6, 0, 0, 0]),
        (b"tEXt", b"Comment\0written by a test"),
        (b"IDAT", &[0x78; 64]),
        (b"IDAT", &[0x9c; 17]),
        (b"IEND", b""),
    ])
}

/// Offsets of every CRC field in a well-formed container.
pub fn crc_offsets(png: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut pos = 8;
    while pos + 12 <= png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        offsets.push(pos + 8 + len);
        let terminal = &png[pos + 4..pos + 8] == b"IEND";
        pos += 12 + len;
        if terminal {
            break;
        }
    }
    offsets
}

/// BLAKE3 of `bytes` with the four bytes at `window` removed.
pub fn hash_without(bytes: &[u8], window: usize) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&bytes[..window]);
    hasher.update(&bytes[window + 4..]);
    hasher.finalize().into()
}

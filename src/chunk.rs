use byteorder::{BigEndian, WriteBytesExt};
use std::fmt;
use std::io::{self, Write};

use crate::crc::chunk_crc;

/// Bytes taken by the length field.
pub const LENGTH_FIELD_SIZE: u64 = 4;
/// Bytes taken by the type tag.
pub const TYPE_FIELD_SIZE: u64 = 4;
/// Bytes taken by the trailing CRC.
pub const CRC_FIELD_SIZE: u64 = 4;
/// Framing bytes around a payload: length + type + CRC.
pub const CHUNK_OVERHEAD: u64 = LENGTH_FIELD_SIZE + TYPE_FIELD_SIZE + CRC_FIELD_SIZE;

/// Four-byte chunk type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Terminal marker; decoding stops after this chunk.
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The tag as text, or hex when it is not printable ASCII.
    pub fn name(&self) -> String {
        if self.0.iter().all(|b| b.is_ascii_alphanumeric()) {
            self.0.iter().map(|&b| b as char).collect()
        } else {
            hex::encode(self.0)
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(tag: [u8; 4]) -> Self {
        ChunkType(tag)
    }
}

/// One decoded `[length][type][payload][crc]` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Absolute offset of the length field in the source file.
    pub offset:     u64,
    /// Payload length as stored (big-endian on disk).
    pub length:     u32,
    pub chunk_type: ChunkType,
    pub data:       Vec<u8>,
    /// CRC as read from the stream.
    pub crc:        u32,
}

impl Chunk {
    /// Build a chunk with a correct CRC.  Used to assemble containers.
    ///
    /// Fails with `InvalidInput` when the payload does not fit the 32-bit
    /// length field.
    pub fn new(offset: u64, chunk_type: ChunkType, data: Vec<u8>) -> io::Result<Self> {
        let length = payload_length(data.len())?;
        let crc = chunk_crc(chunk_type.as_bytes(), &data);
        Ok(Self { offset, length, chunk_type, data, crc })
    }

    /// Absolute offset of the stored CRC: `offset + 8 + length`.
    pub fn crc_offset(&self) -> u64 {
        self.offset + LENGTH_FIELD_SIZE + TYPE_FIELD_SIZE + self.length as u64
    }

    /// Bytes the chunk occupies on disk.
    pub fn total_len(&self) -> u64 {
        CHUNK_OVERHEAD + self.length as u64
    }

    /// Offset of the record that follows this one.
    pub fn next_offset(&self) -> u64 {
        self.offset + self.total_len()
    }

    pub fn computed_crc(&self) -> u32 {
        chunk_crc(self.chunk_type.as_bytes(), &self.data)
    }

    pub fn crc_is_valid(&self) -> bool {
        self.crc == self.computed_crc()
    }

    pub fn is_terminal(&self) -> bool {
        self.chunk_type == ChunkType::IEND
    }

    /// Serialise in wire layout, using the stored CRC verbatim.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(self.length)?;
        writer.write_all(self.chunk_type.as_bytes())?;
        writer.write_all(&self.data)?;
        writer.write_u32::<BigEndian>(self.crc)?;
        Ok(())
    }
}

/// Payload size as a wire length field.
fn payload_length(len: usize) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload of {len} bytes exceeds the 32-bit length field"),
        )
    })
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{:x} - {:08X} - Valid CRC? {}",
            self.chunk_type,
            self.offset,
            self.crc,
            self.crc_is_valid()
        )
    }
}

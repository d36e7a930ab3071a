pub mod signature;
pub mod crc;
pub mod chunk;
pub mod decoder;
pub mod corrector;
pub mod repair;
pub mod config;
pub mod error;
pub mod walk;

pub use signature::{is_candidate, HEADER_SIZE, SIGNATURE};
pub use chunk::{Chunk, ChunkType};
pub use decoder::{decode, ChunkReader, DecodeStop, Decoded};
pub use corrector::{correct, verify, Verdict};
pub use repair::{process, process_with, repair_file, FileOutcome, RepairReport};
pub use config::{RepairOptions, TruncatedPolicy};
pub use error::{PngCrcError, Result};
pub use walk::list_candidate_files;

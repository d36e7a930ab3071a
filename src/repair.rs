//! Per-file repair pass: gate, decode the whole chunk area, then correct.
//!
//! Decoding always finishes before the first write.  Corrections seek the
//! same handle, so interleaving them with decoding would break the offset
//! bookkeeping.
//!
//! ```no_run
//! use pngcrc::repair::{repair_file, FileOutcome};
//! use pngcrc::RepairOptions;
//!
//! if let FileOutcome::Processed(report) = repair_file("image.png".as_ref(), &RepairOptions::default())? {
//!     println!("corrected: {}", report.corrected());
//! }
//! # Ok::<(), pngcrc::PngCrcError>(())
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::chunk::ChunkType;
use crate::config::{RepairOptions, TruncatedPolicy};
use crate::corrector::{correct, verify, Verdict};
use crate::decoder::{decode, Decoded};
use crate::error::{PngCrcError, Result};
use crate::signature::{is_candidate, read_prefix, HEADER_SIZE};

// ── Report types ──────────────────────────────────────────────────────────────

/// One chunk whose stored CRC did not match its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcMismatch {
    pub chunk_type: ChunkType,
    /// Offset of the chunk's length field.
    pub offset:     u64,
    /// Offset of the four CRC bytes.
    pub crc_offset: u64,
    pub stored:     u32,
    pub expected:   u32,
}

/// Everything learned from one pass over a file.
#[derive(Debug)]
pub struct RepairReport {
    pub decoded:    Decoded,
    pub mismatches: Vec<CrcMismatch>,
    /// `true` when at least one CRC was written back.
    pub written:    bool,
}

impl RepairReport {
    pub fn corrected(&self) -> bool {
        self.written
    }

    /// Whether the chunk stream ended on the terminal chunk.
    pub fn completed(&self) -> bool {
        self.decoded.completed()
    }
}

/// What happened to a file handed to [`repair_file`].
#[derive(Debug)]
pub enum FileOutcome {
    /// Gate rejected the file; nothing was decoded or written.
    NotCandidate,
    Processed(RepairReport),
}

impl FileOutcome {
    pub fn corrected(&self) -> bool {
        matches!(self, FileOutcome::Processed(r) if r.corrected())
    }

    pub fn report(&self) -> Option<&RepairReport> {
        match self {
            FileOutcome::Processed(r) => Some(r),
            FileOutcome::NotCandidate => None,
        }
    }
}

// ── Processing ────────────────────────────────────────────────────────────────

/// Decode and correct `handle` with default options.  Returns whether any
/// chunk CRC was rewritten.
pub fn process<F: Read + Write + Seek>(handle: &mut F) -> io::Result<bool> {
    process_with(handle, &RepairOptions::default()).map(|r| r.corrected())
}

/// Decode the chunk area of an already gated container, then rewrite every
/// wrong CRC unless `opts` says otherwise.
///
/// Structural decode problems are not errors; they show up in
/// [`RepairReport::decoded`].  Seek and write failures are returned as `Err`.
pub fn process_with<F: Read + Write + Seek>(
    handle: &mut F,
    opts:   &RepairOptions,
) -> io::Result<RepairReport> {
    handle.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
    let decoded = decode(handle)?;

    let mismatches: Vec<CrcMismatch> = decoded
        .chunks
        .iter()
        .filter_map(|chunk| match verify(chunk) {
            Verdict::Valid => None,
            Verdict::Mismatch { stored, expected } => Some(CrcMismatch {
                chunk_type: chunk.chunk_type,
                offset:     chunk.offset,
                crc_offset: chunk.crc_offset(),
                stored,
                expected,
            }),
        })
        .collect();

    let skip_truncated = !decoded.completed() && opts.truncated == TruncatedPolicy::Skip;
    if skip_truncated && !mismatches.is_empty() {
        log::warn!(
            "leaving {} bad CRC(s) alone: {}",
            mismatches.len(),
            decoded.stop
        );
    }

    let mut written = false;
    if !opts.dry_run && !skip_truncated && !mismatches.is_empty() {
        for chunk in &decoded.chunks {
            written |= correct(handle, chunk)?;
        }
        handle.flush()?;
    }

    Ok(RepairReport { decoded, mismatches, written })
}

/// Open `path`, apply the format gate and process it.
///
/// The file is opened read-write (read-only for dry runs) and closed before
/// returning on every path.
pub fn repair_file(path: &Path, opts: &RepairOptions) -> Result<FileOutcome> {
    let mut file: File = OpenOptions::new()
        .read(true)
        .write(!opts.dry_run)
        .open(path)
        .map_err(PngCrcError::file(path))?;

    let prefix = read_prefix(&mut file).map_err(PngCrcError::file(path))?;
    if !is_candidate(&prefix) {
        log::trace!("skipping {}: not a PNG", path.display());
        return Ok(FileOutcome::NotCandidate);
    }

    log::debug!("processing {}", path.display());
    let report = process_with(&mut file, opts).map_err(PngCrcError::file(path))?;
    Ok(FileOutcome::Processed(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::signature::SIGNATURE;
    use std::io::Cursor;

    fn png(chunks: &[Chunk]) -> Vec<u8> {
        let mut out = SIGNATURE.to_vec();
        for c in chunks {
            c.write_to(&mut out).unwrap();
        }
        out
    }

    fn sample(bad_idat: bool) -> Vec<Chunk> {
        let mut idat = Chunk::new(0, ChunkType::IDAT, vec![3; 40]).unwrap();
        if bad_idat {
            idat.crc = !idat.crc;
        }
        vec![Chunk::new(0, ChunkType::IHDR, vec![1; 13]).unwrap(), idat, Chunk::new(0, ChunkType::IEND, vec![]).unwrap()]
    }

    #[test]
    fn clean_file_reports_nothing() {
        let bytes = png(&sample(false));
        let mut cur = Cursor::new(bytes.clone());

        assert!(!process(&mut cur).unwrap());
        assert_eq!(cur.into_inner(), bytes);
    }

    #[test]
    fn bad_crc_is_fixed() {
        let mut cur = Cursor::new(png(&sample(true)));

        assert!(process(&mut cur).unwrap());
        assert_eq!(cur.into_inner(), png(&sample(false)));
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let bytes = png(&sample(true));
        let mut cur = Cursor::new(bytes.clone());
        let report = process_with(&mut cur, &RepairOptions::dry_run()).unwrap();

        assert!(!report.corrected());
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].chunk_type, ChunkType::IDAT);
        assert_eq!(report.mismatches[0].crc_offset, 8 + 25 + 8 + 40);
        assert_eq!(cur.into_inner(), bytes);
    }

    #[test]
    fn skip_policy_leaves_truncated_file_alone() {
        let mut bytes = png(&sample(true));
        bytes.truncate(bytes.len() - 6);
        let opts = RepairOptions { truncated: TruncatedPolicy::Skip, ..Default::default() };
        let mut cur = Cursor::new(bytes.clone());
        let report = process_with(&mut cur, &opts).unwrap();

        assert!(!report.completed());
        assert!(!report.corrected());
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(cur.into_inner(), bytes);
    }

    #[test]
    fn default_policy_repairs_truncated_file() {
        let mut bytes = png(&sample(true));
        bytes.truncate(bytes.len() - 6);
        let mut cur = Cursor::new(bytes);

        assert!(process(&mut cur).unwrap());
    }
}

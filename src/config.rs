//! Options for a repair run.

/// What to do with the readable chunks of a file whose chunk stream did not
/// end on the terminal chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncatedPolicy {
    /// Correct every chunk that was read in full.
    #[default]
    RepairReadable,
    /// Leave the file untouched.
    Skip,
}

/// Configuration for [`crate::repair::process_with`] and
/// [`crate::repair::repair_file`].
#[derive(Debug, Clone, Default)]
pub struct RepairOptions {
    pub truncated: TruncatedPolicy,
    /// Report mismatches without writing anything.
    pub dry_run:   bool,
}

impl RepairOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true, ..Default::default() }
    }
}

use std::collections::BTreeSet;

use thiserror::Error;

/// Result type for all core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the analysis core.
///
/// Every input-related variant carries the name of the offending input so a
/// host can report which of the two files is at fault without re-deriving
/// anything. Computational edge cases (empty sequences, zero codons) are
/// well-defined values, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input is missing or is not FASTA-formatted.
    #[error("{input}: malformed FASTA input: {detail}")]
    MalformedInput { input: String, detail: String },

    /// The input is zero-length or yields zero records.
    #[error("{input}: input is empty or contains no sequence records")]
    EmptyInput { input: String },

    /// No encoding in the fallback chain could decode the bytes.
    #[error(
        "{input}: the file contains bytes that cannot be decoded; \
         re-save it as UTF-8 or ASCII and retry"
    )]
    Encoding { input: String },

    /// Sequence data contains symbols outside `{A, T, C, G, N}`.
    ///
    /// `offending_ids` is bounded to the first few offenders;
    /// `total_offending` counts all of them.
    #[error(
        "invalid characters {symbols:?} found in {total_offending} sequence(s) \
         (first offenders: {offending_ids:?}); sequences may only contain A, T, C, G and N"
    )]
    InvalidAlphabet {
        symbols: BTreeSet<char>,
        offending_ids: Vec<String>,
        total_offending: usize,
    },

    /// An analysis option is out of its documented range.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    /// A bounded read/processing operation exceeded its time limit.
    #[error("{input}: processing exceeded the {limit_secs}s limit; try splitting the file")]
    ProcessingTimeout { input: String, limit_secs: u64 },
}

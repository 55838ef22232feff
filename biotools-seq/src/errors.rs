use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for k-mer counting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmerError {
    /// Window length `k` exceeds the sequence length.
    #[error("k is smaller than sequence length")]
    WindowTooLong { k: usize, length: usize },

    #[error("k must be greater than 0")]
    ZeroLength,

    #[error("Sequence contains non-ASCII characters")]
    NonAscii,
}

/// Error type for FASTQ scanning.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The file could not be opened.
    #[error("Can't read file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed or truncated FASTQ, including a partial last record and a
    /// quality line whose length differs from its sequence.
    #[error("Malformed FASTQ: {0}")]
    Format(#[from] seq_io::fastq::Error),

    #[error(transparent)]
    Kmer(#[from] KmerError),
}

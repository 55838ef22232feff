//! # Sequence level tools for biotools
//!
//! Streaming statistics over FASTQ files and sliding window k-mer counting.
//!
//! ```rust
//! use biotools_seq::count_kmers;
//!
//! let counts = count_kmers("ACTGACTG", 3).unwrap();
//! assert_eq!(counts.get("ACT"), 2);
//! assert_eq!(counts.total(), 6);
//! ```
pub mod errors;
pub mod fastq;
pub mod kmer;

// re-expose core functions
pub use errors::*;
pub use fastq::{FastqStats, count_fastq_kmers, scan_fastq, scan_fastq_reader};
pub use kmer::{KmerCounter, KmerCounts, count_kmers};

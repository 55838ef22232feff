//! # biotools
//!
//! A small bioinformatics toolkit. Each component lives in its own crate and
//! is re-exported here behind a cargo feature:
//!
//! - `core`: BED intervals, BED12 gene models and their exon blocks
//! - `seq`: FASTQ statistics and k-mer counting
//!
#[cfg(feature = "core")]
#[doc(inline)]
pub use biotools_core as core;

#[cfg(feature = "seq")]
#[doc(inline)]
pub use biotools_seq as seq;

//! # Core models for biotools
//!
//! Value types for genomic intervals read from BED files and gene models read
//! from BED12 files. A [models::GeneModel] rebuilds absolute exon coordinates
//! from the BED12 block columns and can clip its exons to any region of the
//! spliced transcript, e.g. the coding region.
//!
//! ```rust
//! use biotools_core::models::{GeneModel, Interval};
//!
//! let interval: Interval = "chr1\t3192856\t3192888".parse().unwrap();
//! assert_eq!(interval.coordinate(), "chr1:3192856-3192888");
//! assert!(!interval.overlap(3192888, 3192900));
//!
//! let model: GeneModel = "chr1\t1000\t5000\ttx\t0\t+\t1200\t4500\t0\t2\t500,1000,\t0,3000,"
//!     .parse()
//!     .unwrap();
//! let (starts, ends) = model.blocks(200, 1000).unwrap();
//! assert_eq!(starts, vec![1200, 4000]);
//! assert_eq!(ends, vec![1500, 4500]);
//! ```
pub mod errors;
pub mod models;
pub mod utils;

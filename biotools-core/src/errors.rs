use thiserror::Error;

/// Malformed or short BED / BED12 line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing {field} field in line: {line:?}")]
    MissingField { field: &'static str, line: String },

    #[error("Error parsing {field} field as integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Invalid strand: {0:?}. Expected one of '+', '-' or '.'")]
    InvalidStrand(String),

    #[error("Chromosome name is empty")]
    EmptyChrom,

    #[error("Invalid interval {chrom}:{start}-{end}. Start must be smaller than end")]
    InvalidInterval { chrom: String, start: u32, end: u32 },

    #[error("Block count {count} does not match {sizes} block sizes and {starts} block starts")]
    BlockCountMismatch {
        count: usize,
        sizes: usize,
        starts: usize,
    },

    #[error("Invalid block layout: {0}")]
    InvalidBlocks(String),

    #[error("Thick range {thick_start}-{thick_end} is outside of {start}-{end}")]
    InvalidThickRange {
        thick_start: u32,
        thick_end: u32,
        start: u32,
        end: u32,
    },
}

/// Degenerate or out-of-range exonic region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("Region {start}-{end} is empty. Start must be smaller than end")]
    EmptyRegion { start: u32, end: u32 },

    #[error("Region {start}-{end} is outside of the transcript (length {length})")]
    OutOfRange { start: u32, end: u32, length: u32 },

    #[error("Transcript {0} has no coding region")]
    NonCoding(String),

    #[error("Position {pos} of transcript {name} is not inside an exon")]
    IntronicBoundary { name: String, pos: u32 },
}

/// Failures while loading a BED12 file into a gene model set. File access
/// errors are reported through `anyhow` with the offending path attached.
#[derive(Error, Debug)]
pub enum GeneModelSetError {
    #[error("Error parsing line {line_number}: {source}")]
    Parse {
        line_number: usize,
        #[source]
        source: ParseError,
    },

    #[error("Corrupted file. 0 gene models found in the file: {0}")]
    EmptySet(String),
}

use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{debug, info};
use seq_io::fastq::{Reader, Record};

use biotools_core::utils::get_dynamic_reader;

use crate::errors::ScanError;
use crate::kmer::{KmerCounter, KmerCounts};

///
/// Read and base counts accumulated over a FASTQ file.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FastqStats {
    pub reads: usize,
    pub bases: usize,
    pub min_length: usize,
    pub max_length: usize,
}

impl FastqStats {
    fn add_read(&mut self, length: usize) {
        self.min_length = match self.reads {
            0 => length,
            _ => self.min_length.min(length),
        };
        self.max_length = self.max_length.max(length);
        self.reads += 1;
        self.bases += length;
    }

    ///
    /// Calculate mean read length, 0 for an empty file
    ///
    pub fn mean_length(&self) -> f64 {
        if self.reads == 0 {
            return 0.0;
        }
        ((self.bases as f64 / self.reads as f64) * 100.0).round() / 100.0
    }
}

impl From<FastqStats> for (usize, usize) {
    fn from(stats: FastqStats) -> Self {
        (stats.reads, stats.bases)
    }
}

fn open_fastq(path: &Path) -> Result<BufReader<Box<dyn Read>>, ScanError> {
    debug!("Opening FASTQ file {}", path.display());
    get_dynamic_reader(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

///
/// Walk every record of a FASTQ reader, handing each sequence line to `f`.
/// The reader rejects a record whose quality line does not match its
/// sequence length, and a truncated last record.
///
fn for_each_sequence<R, F>(reader: &mut Reader<R>, mut f: F) -> Result<usize, ScanError>
where
    R: Read,
    F: FnMut(&[u8]) -> Result<(), ScanError>,
{
    let mut records: usize = 0;
    while let Some(record) = reader.next() {
        let record = record?;
        records += 1;
        f(record.seq())?;
    }
    Ok(records)
}

///
/// Count reads and bases of FASTQ data coming from any reader.
///
pub fn scan_fastq_reader<R: Read>(reader: R) -> Result<FastqStats, ScanError> {
    let mut reader = Reader::new(reader);
    let mut stats = FastqStats::default();
    for_each_sequence(&mut reader, |seq| {
        stats.add_read(seq.len());
        Ok(())
    })?;
    Ok(stats)
}

///
/// Count reads and bases of a FASTQ file.
///
/// The file is streamed one record at a time; files ending in `.gz` are
/// decompressed on the fly.
///
/// # Arguments
/// - path: path to the FASTQ file
///
/// # Errors
/// - [ScanError::Io] if the file can't be opened
/// - [ScanError::Format] if the file is malformed, including a partial last
///   record, a quality line that doesn't match its sequence, and sequences
///   wrapped over several lines. No statistics are returned in that case.
///
pub fn scan_fastq<P: AsRef<Path>>(path: P) -> Result<FastqStats, ScanError> {
    let path = path.as_ref();
    let stats = scan_fastq_reader(open_fastq(path)?)?;

    info!(
        "Scanned {} reads ({} bases) from {}",
        stats.reads,
        stats.bases,
        path.display()
    );
    Ok(stats)
}

///
/// Count k-mers over every read of a FASTQ file. Reads shorter than `k`
/// are skipped.
///
pub fn count_fastq_kmers<P: AsRef<Path>>(path: P, k: usize) -> Result<KmerCounts, ScanError> {
    let path = path.as_ref();
    let mut counter = KmerCounter::new(k)?;
    let mut reader = Reader::new(open_fastq(path)?);
    let reads = for_each_sequence(&mut reader, |seq| Ok(counter.add_bytes(seq)?))?;

    debug!("Counted {}-mers over {} reads of {}", k, reads, path.display());
    Ok(counter.finish())
}

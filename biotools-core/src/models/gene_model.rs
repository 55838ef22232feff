use std::cmp::{max, min};
use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{ParseError, RegionError};
use crate::models::{Interval, Strand};
use crate::utils::{next_field, parse_u32_field, parse_u32_list};

///
/// One exonic block of a gene model.
///
/// `gstart`/`gend` are absolute genomic coordinates, `tstart`/`tend` are
/// offsets along the spliced transcript counted from its leftmost base.
/// Both pairs are half-open.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exon {
    pub gstart: u32,
    pub gend: u32,
    pub tstart: u32,
    pub tend: u32,
}

impl Exon {
    fn new(gstart: u32, gend: u32, tstart: u32) -> Self {
        Exon {
            gstart,
            gend,
            tstart,
            tend: tstart + (gend - gstart),
        }
    }

    pub fn size(&self) -> u32 {
        self.gend - self.gstart
    }

    /// Is the genomic position inside this exon?
    pub fn contains_genomic(&self, pos: u32) -> bool {
        self.gstart <= pos && pos < self.gend
    }

    /// Is the transcript offset inside this exon?
    pub fn contains_transcript(&self, offset: u32) -> bool {
        self.tstart <= offset && offset < self.tend
    }

    #[inline]
    pub fn overlap(&self, start: u32, end: u32) -> bool {
        start < end && self.gstart < end && start < self.gend
    }
}

///
/// A transcript read from a BED12 line: the outer interval plus the exons
/// rebuilt from the block columns.
///
/// Exons are kept in ascending genomic order whatever the strand, the same
/// order BED12 stores its blocks in.
///
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneModel {
    interval: Interval,
    name: String,
    score: String,
    strand: Strand,
    thick_start: u32,
    thick_end: u32,
    item_rgb: String,
    exons: Vec<Exon>,
}

impl GeneModel {
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn chrom(&self) -> &str {
        self.interval.chrom()
    }

    pub fn start(&self) -> u32 {
        self.interval.start()
    }

    pub fn end(&self) -> u32 {
        self.interval.end()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Score column as written; BED allows `.` here.
    pub fn score(&self) -> &str {
        &self.score
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Genomic start of the coding region.
    pub fn thick_start(&self) -> u32 {
        self.thick_start
    }

    /// Genomic end of the coding region, exclusive.
    pub fn thick_end(&self) -> u32 {
        self.thick_end
    }

    pub fn item_rgb(&self) -> &str {
        &self.item_rgb
    }

    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }

    /// Number of exonic bases, i.e. the length of the spliced transcript.
    pub fn transcript_length(&self) -> u32 {
        self.exons.last().map_or(0, |exon| exon.tend)
    }

    pub fn coordinate(&self) -> String {
        self.interval.coordinate()
    }

    pub fn is_coding(&self) -> bool {
        self.thick_start < self.thick_end
    }

    /// Does [start, end) overlap the transcript span, introns included?
    pub fn overlap(&self, start: u32, end: u32) -> bool {
        self.interval.overlap(start, end)
    }

    /// Does [start, end) overlap at least one exon?
    pub fn exon_overlap(&self, start: u32, end: u32) -> bool {
        self.exons.iter().any(|exon| exon.overlap(start, end))
    }

    ///
    /// Map a genomic position to its offset on the spliced transcript.
    /// Returns `None` for intronic or out of range positions.
    ///
    pub fn genomic_to_transcript(&self, pos: u32) -> Option<u32> {
        self.exons
            .iter()
            .find(|exon| exon.contains_genomic(pos))
            .map(|exon| exon.tstart + (pos - exon.gstart))
    }

    ///
    /// Map an offset on the spliced transcript back to the genome.
    ///
    pub fn transcript_to_genomic(&self, offset: u32) -> Option<u32> {
        self.exons
            .iter()
            .find(|exon| exon.contains_transcript(offset))
            .map(|exon| exon.gstart + (offset - exon.tstart))
    }

    ///
    /// Get the genomic blocks covering a region of the spliced transcript.
    ///
    /// The region [region_start, region_end) is given as exonic offsets from
    /// the leftmost transcript base. Exons outside of it are dropped, the
    /// first and last exons touched by it are clipped to its boundaries, and
    /// the exons in between are returned whole.
    ///
    /// # Arguments
    /// - region_start: first exonic offset of the region
    /// - region_end: exonic offset just past the region; clamped to the
    ///   transcript length
    ///
    /// # Returns
    /// Parallel vectors of block starts and block ends, ascending on the
    /// genome.
    ///
    pub fn blocks(
        &self,
        region_start: u32,
        region_end: u32,
    ) -> Result<(Vec<u32>, Vec<u32>), RegionError> {
        let region_end = self.check_region(region_start, region_end)?;

        let mut block_starts: Vec<u32> = Vec::new();
        let mut block_ends: Vec<u32> = Vec::new();

        for exon in &self.exons {
            let lo = max(region_start, exon.tstart);
            let hi = min(region_end, exon.tend);
            if lo < hi {
                block_starts.push(exon.gstart + (lo - exon.tstart));
                block_ends.push(exon.gstart + (hi - exon.tstart));
            }
        }

        Ok((block_starts, block_ends))
    }

    ///
    /// Same as [GeneModel::blocks], but offsets are counted from the 5' end
    /// of the transcript, so from the right on the reverse strand. The
    /// returned blocks are still ascending on the genome.
    ///
    pub fn stranded_blocks(
        &self,
        region_start: u32,
        region_end: u32,
    ) -> Result<(Vec<u32>, Vec<u32>), RegionError> {
        match self.strand {
            Strand::Reverse => {
                let region_end = self.check_region(region_start, region_end)?;
                let length = self.transcript_length();
                self.blocks(length - region_end, length - region_start)
            }
            _ => self.blocks(region_start, region_end),
        }
    }

    ///
    /// Get the genomic blocks of the coding region between thick start and
    /// thick end.
    ///
    pub fn thick_blocks(&self) -> Result<(Vec<u32>, Vec<u32>), RegionError> {
        if !self.is_coding() {
            return Err(RegionError::NonCoding(self.name.clone()));
        }

        let coding_start = self.genomic_to_transcript(self.thick_start).ok_or_else(|| {
            RegionError::IntronicBoundary {
                name: self.name.clone(),
                pos: self.thick_start,
            }
        })?;
        // thick end is exclusive, map the last coding base instead
        let coding_end = self
            .genomic_to_transcript(self.thick_end - 1)
            .ok_or_else(|| RegionError::IntronicBoundary {
                name: self.name.clone(),
                pos: self.thick_end,
            })?
            + 1;

        self.blocks(coding_start, coding_end)
    }

    fn check_region(&self, region_start: u32, region_end: u32) -> Result<u32, RegionError> {
        let length = self.transcript_length();
        if region_start >= region_end {
            return Err(RegionError::EmptyRegion {
                start: region_start,
                end: region_end,
            });
        }
        if region_start >= length {
            return Err(RegionError::OutOfRange {
                start: region_start,
                end: region_end,
                length,
            });
        }
        Ok(min(region_end, length))
    }

    ///
    /// Get file string of the gene model
    ///
    pub fn as_string(&self) -> String {
        self.interval.as_string()
    }
}

impl FromStr for GeneModel {
    type Err = ParseError;

    ///
    /// Parse a BED12 line.
    ///
    /// Block starts are relative to the transcript start; block sizes and
    /// block starts may end with a trailing comma.
    ///
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let interval: Interval = line.parse()?;

        let mut fields = line.split('\t').skip(3);
        let name = next_field(&mut fields, "name", line)?.to_string();
        let score = next_field(&mut fields, "score", line)?.to_string();
        let strand: Strand = next_field(&mut fields, "strand", line)?.parse()?;
        let thick_start =
            parse_u32_field(next_field(&mut fields, "thickStart", line)?, "thickStart")?;
        let thick_end = parse_u32_field(next_field(&mut fields, "thickEnd", line)?, "thickEnd")?;
        let item_rgb = next_field(&mut fields, "itemRgb", line)?.to_string();
        let block_count =
            parse_u32_field(next_field(&mut fields, "blockCount", line)?, "blockCount")? as usize;
        let block_sizes =
            parse_u32_list(next_field(&mut fields, "blockSizes", line)?, "blockSizes")?;
        let block_starts =
            parse_u32_list(next_field(&mut fields, "blockStarts", line)?, "blockStarts")?;

        if block_count != block_sizes.len() || block_count != block_starts.len() {
            return Err(ParseError::BlockCountMismatch {
                count: block_count,
                sizes: block_sizes.len(),
                starts: block_starts.len(),
            });
        }

        if thick_start > thick_end || thick_start < interval.start() || thick_end > interval.end() {
            return Err(ParseError::InvalidThickRange {
                thick_start,
                thick_end,
                start: interval.start(),
                end: interval.end(),
            });
        }

        let exons = build_exons(&interval, &block_sizes, &block_starts)?;

        Ok(GeneModel {
            interval,
            name,
            score,
            strand,
            thick_start,
            thick_end,
            item_rgb,
            exons,
        })
    }
}

impl Display for GeneModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

///
/// Rebuild absolute exon coordinates from BED12 block sizes and block
/// starts, checking that the blocks tile the transcript from its start to
/// its end without overlapping each other.
///
fn build_exons(
    interval: &Interval,
    block_sizes: &[u32],
    block_starts: &[u32],
) -> Result<Vec<Exon>, ParseError> {
    if block_sizes.is_empty() {
        return Err(ParseError::InvalidBlocks(format!(
            "{} has no blocks",
            interval.coordinate()
        )));
    }

    let mut exons: Vec<Exon> = Vec::with_capacity(block_sizes.len());
    let mut tpos: u32 = 0;

    for (i, (&size, &offset)) in block_sizes.iter().zip(block_starts).enumerate() {
        let gstart = interval.start().checked_add(offset);
        let gend = gstart.and_then(|gstart| gstart.checked_add(size));
        let (gstart, gend) = match (gstart, gend) {
            (Some(gstart), Some(gend)) => (gstart, gend),
            _ => {
                return Err(ParseError::InvalidBlocks(format!(
                    "block {} of {} does not fit in 32 bit coordinates",
                    i,
                    interval.coordinate()
                )));
            }
        };

        if let Some(previous) = exons.last() {
            if gstart < previous.gend {
                return Err(ParseError::InvalidBlocks(format!(
                    "block {} ({}-{}) overlaps or precedes block {} ({}-{})",
                    i,
                    gstart,
                    gend,
                    i - 1,
                    previous.gstart,
                    previous.gend
                )));
            }
        }

        let exon = Exon::new(gstart, gend, tpos);
        tpos = exon.tend;
        exons.push(exon);
    }

    let first = exons[0];
    let last = exons[exons.len() - 1];
    if first.gstart != interval.start() || last.gend != interval.end() {
        return Err(ParseError::InvalidBlocks(format!(
            "blocks span {}-{} but the transcript spans {}",
            first.gstart,
            last.gend,
            interval.coordinate()
        )));
    }

    Ok(exons)
}

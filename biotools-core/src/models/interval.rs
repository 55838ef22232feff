use std::cmp::{max, min};
use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::models::Strand;
use crate::utils::{next_field, parse_u32_field};

///
/// A genomic range on one chromosome, [start, end).
/// Inclusive start, exclusive of end. Built from a BED line and never
/// modified afterwards.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    chrom: String,
    start: u32,
    end: u32,

    rest: Option<String>,
}

impl Interval {
    ///
    /// Create a new interval, checking that the chromosome is named and the
    /// range is not empty.
    ///
    pub fn new(chrom: impl Into<String>, start: u32, end: u32) -> Result<Self, ParseError> {
        let chrom = chrom.into();
        if chrom.is_empty() {
            return Err(ParseError::EmptyChrom);
        }
        if start >= end {
            return Err(ParseError::InvalidInterval { chrom, start, end });
        }
        Ok(Interval {
            chrom,
            start,
            end,
            rest: None,
        })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Columns after `end`, tab-joined, exactly as read.
    pub fn rest(&self) -> Option<&str> {
        self.rest.as_deref()
    }

    ///
    /// Get length of the interval
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// Human readable location, `chrom:start-end`, using the stored
    /// coordinates as they are.
    ///
    pub fn coordinate(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.start, self.end)
    }

    /// Name column (4th), if present.
    pub fn name(&self) -> Option<&str> {
        self.rest_field(0).filter(|s| !s.is_empty())
    }

    /// Strand column (6th); `Unknown` when the line is shorter.
    pub fn strand(&self) -> Strand {
        self.rest_field(2)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    fn rest_field(&self, index: usize) -> Option<&str> {
        self.rest.as_deref()?.split('\t').nth(index)
    }

    /// Check if the half-open range [start, end) overlaps this interval.
    /// Ranges that only touch do not overlap, and an empty range never does.
    #[inline]
    pub fn overlap(&self, start: u32, end: u32) -> bool {
        start < end && self.start < end && start < self.end
    }

    /// Compute the number of bases shared with another interval
    #[inline]
    pub fn intersect(&self, other: &Interval) -> u32 {
        if self.chrom != other.chrom {
            return 0;
        }
        min(self.end, other.end).saturating_sub(max(self.start, other.start))
    }

    ///
    /// Get file string of the interval
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chrom,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

impl FromStr for Interval {
    type Err = ParseError;

    ///
    /// Parse the first three columns of a tab-delimited BED line. Any
    /// further columns are kept verbatim.
    ///
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.split('\t');

        let chrom = next_field(&mut fields, "chrom", line)?;
        let start = parse_u32_field(next_field(&mut fields, "start", line)?, "start")?;
        let end = parse_u32_field(next_field(&mut fields, "end", line)?, "end")?;

        let rest: Vec<&str> = fields.collect();
        if let Some(strand) = rest.get(2) {
            strand.parse::<Strand>()?;
        }

        let mut interval = Interval::new(chrom, start, end)?;
        interval.rest = Some(rest.join("\t")).filter(|s| !s.is_empty());
        Ok(interval)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

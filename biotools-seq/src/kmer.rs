use std::collections::hash_map;

use fxhash::FxHashMap;

use crate::errors::KmerError;

///
/// Occurrence count of every k-mer seen. Two tables are equal when they hold
/// the same k-mers with the same counts, whatever the insertion order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KmerCounts {
    counts: FxHashMap<String, usize>,
}

impl KmerCounts {
    /// Count of a k-mer, 0 if it was never seen.
    pub fn get(&self, kmer: &str) -> usize {
        self.counts.get(kmer).copied().unwrap_or(0)
    }

    /// Number of distinct k-mers
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of windows counted, i.e. the sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(kmer, count)| (kmer.as_str(), *count))
    }

    ///
    /// The `n` most frequent k-mers, most frequent first. Ties are broken
    /// alphabetically so the result is deterministic.
    ///
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted.truncate(n);
        sorted
    }

    fn increment(&mut self, kmer: &str) {
        match self.counts.get_mut(kmer) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(kmer.to_string(), 1);
            }
        }
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for KmerCounts {
    fn from_iter<T: IntoIterator<Item = (S, usize)>>(iter: T) -> Self {
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        for (kmer, count) in iter {
            *counts.entry(kmer.into()).or_insert(0) += count;
        }
        KmerCounts { counts }
    }
}

impl IntoIterator for KmerCounts {
    type Item = (String, usize);
    type IntoIter = hash_map::IntoIter<String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

///
/// Sliding window k-mer counter that can be fed any number of sequences.
/// Windows move one base at a time, so overlapping k-mers are all counted.
///
#[derive(Debug, Clone)]
pub struct KmerCounter {
    k: usize,
    counts: KmerCounts,
}

impl KmerCounter {
    pub fn new(k: usize) -> Result<Self, KmerError> {
        if k == 0 {
            return Err(KmerError::ZeroLength);
        }
        Ok(KmerCounter {
            k,
            counts: KmerCounts::default(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    ///
    /// Count every window of one sequence. Sequences shorter than `k`
    /// contribute nothing.
    ///
    pub fn add_bytes(&mut self, sequence: &[u8]) -> Result<(), KmerError> {
        if !sequence.is_ascii() {
            return Err(KmerError::NonAscii);
        }
        for window in sequence.windows(self.k) {
            self.counts.increment(&String::from_utf8_lossy(window));
        }
        Ok(())
    }

    pub fn add_sequence(&mut self, sequence: &str) -> Result<(), KmerError> {
        self.add_bytes(sequence.as_bytes())
    }

    pub fn counts(&self) -> &KmerCounts {
        &self.counts
    }

    pub fn finish(self) -> KmerCounts {
        self.counts
    }
}

///
/// Count k-mers in a sequence.
///
/// # Arguments
/// - sequence: nucleotide string
/// - k: window length, at most the sequence length
///
/// # Returns
/// Table of every window of length `k` with its number of occurrences.
///
pub fn count_kmers(sequence: &str, k: usize) -> Result<KmerCounts, KmerError> {
    let mut counter = KmerCounter::new(k)?;
    if k > sequence.len() {
        return Err(KmerError::WindowTooLong {
            k,
            length: sequence.len(),
        });
    }
    counter.add_sequence(sequence)?;
    Ok(counter.finish())
}

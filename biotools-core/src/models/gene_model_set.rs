use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::errors::GeneModelSetError;
use crate::models::GeneModel;
use crate::utils::{get_dynamic_reader, is_header_line};

///
/// GeneModelSet struct, the representation of a BED12 annotation file:
/// every transcript of the file in file order.
///
#[derive(Clone, Debug)]
pub struct GeneModelSet {
    pub models: Vec<GeneModel>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for GeneModelSet {
    type Error = anyhow::Error;

    ///
    /// Create a new [GeneModelSet] from a BED12 file.
    ///
    /// # Arguments:
    /// - value: path to a BED12 file on disk, optionally gzipped.
    fn try_from(value: &Path) -> Result<Self> {
        debug!("Loading gene models from {}", value.display());

        let reader = get_dynamic_reader(value)
            .with_context(|| format!("Failed to open file: {}", value.display()))?;

        let mut models: Vec<GeneModel> = Vec::new();
        let mut header: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| {
                format!("Failed to read line {} of {}", index + 1, value.display())
            })?;

            if is_header_line(&line) {
                if !line.trim().is_empty() {
                    header.push(line);
                }
                continue;
            }

            let model: GeneModel = line.parse().map_err(|source| GeneModelSetError::Parse {
                line_number: index + 1,
                source,
            })?;

            if !seen.insert(model.name().to_string()) {
                warn!(
                    "Transcript {} appears more than once in {}",
                    model.name(),
                    value.display()
                );
            }
            models.push(model);
        }

        if models.is_empty() {
            return Err(GeneModelSetError::EmptySet(value.display().to_string()).into());
        }

        info!(
            "Loaded {} gene models from {}",
            models.len(),
            value.display()
        );

        Ok(GeneModelSet {
            models,
            header: match header.is_empty() {
                true => None,
                false => Some(header.join("\n")),
            },
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for GeneModelSet {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        GeneModelSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for GeneModelSet {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        GeneModelSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for GeneModelSet {
    type Error = anyhow::Error;

    fn try_from(value: PathBuf) -> Result<Self> {
        GeneModelSet::try_from(value.as_path())
    }
}

impl From<Vec<GeneModel>> for GeneModelSet {
    fn from(models: Vec<GeneModel>) -> Self {
        GeneModelSet {
            models,
            header: None,
            path: None,
        }
    }
}

impl<'a> IntoIterator for &'a GeneModelSet {
    type Item = &'a GeneModel;
    type IntoIter = std::slice::Iter<'a, GeneModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

impl GeneModelSet {
    ///
    /// Get number of gene models in the set
    ///
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    ///
    /// Get the first gene model with the given transcript name
    ///
    pub fn get(&self, name: &str) -> Option<&GeneModel> {
        self.models.iter().find(|m| m.name() == name)
    }

    ///
    /// Iterate every gene model sharing the given transcript name
    ///
    pub fn get_all<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a GeneModel> + use<'a, 'b> {
        self.models.iter().filter(move |m| m.name() == name)
    }

    ///
    /// Iterate unique chromosomes of the set, in sorted order
    ///
    pub fn iter_chroms(&self) -> impl Iterator<Item = &str> {
        let unique_chroms: BTreeSet<&str> = self.models.iter().map(|m| m.chrom()).collect();
        unique_chroms.into_iter()
    }

    ///
    /// Iterate through gene models located on a specific chromosome
    ///
    /// # Arguments
    /// - chrom: chromosome name
    ///
    pub fn iter_chrom_models<'a, 'b>(
        &'a self,
        chrom: &'b str,
    ) -> impl Iterator<Item = &'a GeneModel> + use<'a, 'b> {
        self.models.iter().filter(move |m| m.chrom() == chrom)
    }

    ///
    /// Find gene models whose span overlaps [start, end) on one chromosome
    ///
    pub fn find_overlaps(&self, chrom: &str, start: u32, end: u32) -> Vec<&GeneModel> {
        self.iter_chrom_models(chrom)
            .filter(|m| m.overlap(start, end))
            .collect()
    }

    ///
    /// Find gene models with at least one exon overlapping [start, end)
    ///
    pub fn find_exon_overlaps(&self, chrom: &str, start: u32, end: u32) -> Vec<&GeneModel> {
        self.iter_chrom_models(chrom)
            .filter(|m| m.exon_overlap(start, end))
            .collect()
    }

    ///
    /// Sort gene models by chromosome and start.
    /// Sorting is happening inside the object,
    /// where original order will be overwritten
    ///
    pub fn sort(&mut self) {
        self.models.sort_by(|a, b| {
            a.chrom()
                .cmp(b.chrom())
                .then_with(|| a.start().cmp(&b.start()))
        });
    }
}

impl Display for GeneModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeneModelSet with {} gene models.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    fn write_temp_bed12(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".bed12").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[rstest]
    fn test_open_from_path() {
        let file_path = get_test_path("test.bed12");
        let gene_models = GeneModelSet::try_from(file_path.as_path()).unwrap();
        assert_eq!(gene_models.len(), 3);
        assert!(gene_models.header.is_none());
        assert_eq!(gene_models.path.unwrap(), file_path);
    }

    #[rstest]
    fn test_open_from_string() {
        let file_path = get_test_path("test.bed12");
        assert!(GeneModelSet::try_from(file_path.to_str().unwrap()).is_ok());
    }

    #[rstest]
    fn test_open_gz() {
        let plain = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        let gzipped = GeneModelSet::try_from(get_test_path("test.bed12.gz")).unwrap();
        assert_eq!(plain.models, gzipped.models);
    }

    #[rstest]
    fn test_read_headers() {
        let gene_models = GeneModelSet::try_from(get_test_path("test_headers.bed12")).unwrap();
        assert_eq!(gene_models.len(), 3);
        assert_eq!(
            gene_models.header.as_deref(),
            Some(concat!(
                "track name=test_transcripts description=\"test transcripts\"\n",
                "# chrom\tstart\tend"
            ))
        );
    }

    #[rstest]
    fn test_get_by_name() {
        let gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        let model = gene_models.get("tx_plus").unwrap();
        assert_eq!(model.coordinate(), "chr1:1000-5000");
        assert!(gene_models.get("missing").is_none());
    }

    #[rstest]
    fn test_iter_chroms() {
        let gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        assert_eq!(gene_models.iter_chroms().collect::<Vec<_>>(), vec!["chr1", "chr8"]);
        assert_eq!(gene_models.iter_chrom_models("chr8").count(), 2);
    }

    #[rstest]
    fn test_find_overlaps() {
        let gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();

        let hits = gene_models.find_overlaps("chr8", 45691180, 45691200);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "test_transcript_1");

        let hits = gene_models.find_overlaps("chr8", 45800000, 45950000);
        assert_eq!(hits.len(), 2);

        assert!(gene_models.find_overlaps("chr2", 0, 100000000).is_empty());
    }

    #[rstest]
    fn test_find_overlaps_outlives_query_chrom() {
        let gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        let hits = {
            let chrom = String::from("chr8");
            gene_models.find_exon_overlaps(&chrom, 45691180, 45691200)
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "test_transcript_1");
    }

    #[rstest]
    fn test_find_exon_overlaps() {
        let gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        assert!(gene_models.find_exon_overlaps("chr1", 1500, 4000).is_empty());
        assert_eq!(gene_models.find_overlaps("chr1", 1500, 4000).len(), 1);
    }

    #[rstest]
    fn test_sort() {
        let mut gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        gene_models.sort();
        let names: Vec<&str> = gene_models.models.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["tx_plus", "test_transcript_1", "nc_transcript_1"]);
    }

    #[rstest]
    fn test_duplicate_names() {
        let file = write_temp_bed12(concat!(
            "chr1\t100\t200\tdup\t0\t+\t100\t200\t0\t1\t100,\t0,\n",
            "chr2\t100\t200\tdup\t0\t-\t100\t200\t0\t1\t100,\t0,\n",
        ));
        let gene_models = GeneModelSet::try_from(file.path()).unwrap();
        assert_eq!(gene_models.get_all("dup").count(), 2);
        assert_eq!(gene_models.get("dup").unwrap().chrom(), "chr1");
    }

    #[rstest]
    fn test_malformed_line_reports_line_number() {
        let file = write_temp_bed12(concat!(
            "chr1\t100\t200\tok\t0\t+\t100\t200\t0\t1\t100,\t0,\n",
            "chr1\t100\t200\tbroken\t0\t+\t100\t200\t0\t2\t100,\t0,\n",
        ));
        let error = GeneModelSet::try_from(file.path()).unwrap_err();
        match error.downcast_ref::<GeneModelSetError>() {
            Some(GeneModelSetError::Parse { line_number, .. }) => assert_eq!(*line_number, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[rstest]
    fn test_empty_file() {
        let file = write_temp_bed12("track name=empty\n");
        let error = GeneModelSet::try_from(file.path()).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<GeneModelSetError>(),
            Some(GeneModelSetError::EmptySet(_))
        ));
    }

    #[rstest]
    fn test_missing_file() {
        let result = GeneModelSet::try_from(get_test_path("missing.bed12"));
        assert!(result.is_err());
    }

    #[rstest]
    fn test_display() {
        let gene_models = GeneModelSet::try_from(get_test_path("test.bed12")).unwrap();
        assert_eq!(gene_models.to_string(), "GeneModelSet with 3 gene models.");
    }
}

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::ParseError;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Lines that carry no record in BED-like files: blank lines, comments and
/// UCSC `track`/`browser` declarations.
///
pub fn is_header_line(line: &str) -> bool {
    line.trim().is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

pub(crate) fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
    line: &str,
) -> Result<&'a str, ParseError> {
    fields.next().ok_or_else(|| ParseError::MissingField {
        field,
        line: line.to_string(),
    })
}

pub(crate) fn parse_u32_field(value: &str, field: &'static str) -> Result<u32, ParseError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

///
/// Parse a comma separated list of integers such as the BED12 block sizes
/// column. A trailing comma is tolerated.
///
pub(crate) fn parse_u32_list(value: &str, field: &'static str) -> Result<Vec<u32>, ParseError> {
    let value = value.trim().trim_end_matches(',');
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|item| parse_u32_field(item, field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::BufRead;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    #[rstest]
    #[case("1440,70,145,", vec![1440, 70, 145])]
    #[case("1440,70,145", vec![1440, 70, 145])]
    #[case("0,", vec![0])]
    #[case("", vec![])]
    fn test_parse_u32_list(#[case] value: &str, #[case] expected: Vec<u32>) {
        assert_eq!(parse_u32_list(value, "blockSizes").unwrap(), expected);
    }

    #[rstest]
    fn test_parse_u32_list_rejects_garbage() {
        let result = parse_u32_list("10,x,30", "blockStarts");
        assert_eq!(
            result,
            Err(ParseError::InvalidInteger {
                field: "blockStarts",
                value: "x".to_string()
            })
        );
    }

    #[rstest]
    #[case("track name=genes", true)]
    #[case("browser position chr8:1-100", true)]
    #[case("# comment", true)]
    #[case("   ", true)]
    #[case("chr8\t1\t100", false)]
    fn test_is_header_line(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_header_line(line), expected);
    }

    #[rstest]
    fn test_dynamic_reader_plain_and_gzip() {
        let plain = get_dynamic_reader(&get_test_path("test.fq")).unwrap();
        let gzipped = get_dynamic_reader(&get_test_path("test.fq.gz")).unwrap();

        let plain_lines: Vec<String> = plain.lines().map(|l| l.unwrap()).collect();
        let gzipped_lines: Vec<String> = gzipped.lines().map(|l| l.unwrap()).collect();
        assert_eq!(plain_lines.len(), 748 * 4);
        assert_eq!(plain_lines, gzipped_lines);
    }

    #[rstest]
    fn test_dynamic_reader_missing_file() {
        let result = get_dynamic_reader(&get_test_path("does_not_exist.bed"));
        assert!(result.is_err());
    }
}

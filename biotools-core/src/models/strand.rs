use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

///
/// Strand of a feature on the genome, as written in the BED strand column.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

impl FromStr for Strand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." | "" => Ok(Strand::Unknown),
            _ => Err(ParseError::InvalidStrand(s.to_string())),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("+", Strand::Forward)]
    #[case("-", Strand::Reverse)]
    #[case(".", Strand::Unknown)]
    #[case("", Strand::Unknown)]
    fn test_parse_strand(#[case] token: &str, #[case] expected: Strand) {
        assert_eq!(token.parse::<Strand>().unwrap(), expected);
    }

    #[rstest]
    fn test_parse_invalid_strand() {
        let result = "forward".parse::<Strand>();
        assert_eq!(result, Err(ParseError::InvalidStrand("forward".to_string())));
    }

    #[rstest]
    fn test_display_round_trips_token() {
        assert_eq!(Strand::Reverse.to_string(), "-");
        assert_eq!(Strand::Unknown.to_string(), ".");
    }
}

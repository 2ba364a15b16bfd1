//! Input formats known to the suite.
//!

use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

/// For each source we support, one entry here naming its input format.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    EnumString,
    VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    None,
    /// JSON out of the DRNS deconfliction service.
    Drns,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(Format::Drns, Format::from_str("drns").unwrap());
        assert_eq!(Format::Drns, Format::from_str("DRNS").unwrap());
        assert!(Format::from_str("unknown").is_err());
    }

    #[test]
    fn test_format_to_str() {
        assert_eq!("drns", Format::Drns.to_string());
    }
}

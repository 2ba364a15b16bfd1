//! Define what we consider a "container", that is, a file format.
//!
//! This is different from a "data" format which is why it is here.
//!
use serde::{Deserialize, Serialize};
use strum::VariantNames;

/// Represents the supported output container formats.
///
/// `Raw` is the default and stands for "no recognisable extension".
///
#[derive(
    Copy, Clone, Debug, Default, Deserialize, PartialEq, strum::Display, Serialize, VariantNames,
)]
#[strum(serialize_all = "PascalCase", ascii_case_insensitive)]
pub enum Container {
    /// Common CSV format.
    CSV,
    /// Plain JSON.
    Json,
    /// RAW Files
    #[default]
    Raw,
}

impl From<&str> for Container {
    fn from(path: &str) -> Self {
        let extension = path.rsplit('.').next().unwrap_or_default().to_lowercase();
        match extension.as_str() {
            "csv" => Container::CSV,
            "json" => Container::Json,
            _ => Container::Raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("data.csv", Container::CSV)]
    #[case("data.CSV", Container::CSV)]
    #[case("data.json", Container::Json)]
    #[case("data.JSON", Container::Json)]
    #[case("data.txt", Container::Raw)]
    #[case("data", Container::Raw)]
    #[case("data.", Container::Raw)]
    #[case("", Container::Raw)]
    fn test_container_from_str(#[case] path: &str, #[case] what: Container) {
        assert_eq!(what, Container::from(path));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Augmentation strategies the remote service produces variants for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AugType {
    #[serde(rename = "SR")]
    SynonymReplacement,
    #[serde(rename = "RI")]
    RandomInsertion,
    #[serde(rename = "RS")]
    RandomSwap,
    #[serde(rename = "RD")]
    RandomDeletion,
}

impl AugType {
    /// Fetch order of an upload cycle.
    pub const ALL: [AugType; 4] = [
        AugType::SynonymReplacement,
        AugType::RandomInsertion,
        AugType::RandomSwap,
        AugType::RandomDeletion,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AugType::SynonymReplacement => "SR",
            AugType::RandomInsertion => "RI",
            AugType::RandomSwap => "RS",
            AugType::RandomDeletion => "RD",
        }
    }
}

impl fmt::Display for AugType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AugType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AugType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown augmentation type: {s}"))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SavedArtifact {
    pub aug_type: AugType,
    pub path: String,
    pub bytes: u64,
    pub blake3_hex: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub saved_files: Vec<String>,
    pub artifacts: Vec<SavedArtifact>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(rename = "augType")]
    pub aug_type: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AugmentationQuery {
    #[serde(rename = "augmentationType")]
    pub augmentation_type: Option<String>,
}

/// One original/augmented sentence pair of the preview table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugPair {
    pub origin: String,
    pub aug: String,
}

impl AugPair {
    pub fn empty() -> Self {
        Self {
            origin: String::new(),
            aug: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("sr".parse::<AugType>().unwrap(), AugType::SynonymReplacement);
        assert_eq!("Rd".parse::<AugType>().unwrap(), AugType::RandomDeletion);
        assert!("XX".parse::<AugType>().is_err());
    }

    #[test]
    fn test_fetch_order() {
        let codes: Vec<_> = AugType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec!["SR", "RI", "RS", "RD"]);
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&AugType::RandomSwap).unwrap(), "\"RS\"");
    }
}

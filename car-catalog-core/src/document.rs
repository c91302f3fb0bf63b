//! The nested source document consumed by the bulk loader.
//!
//! Shape: brands → models → generations → configurations → modifications →
//! specifications. Keys are hyphenated in the source (`year-from`,
//! `body-type`, ...). Any key may be missing; missing leaves load as NULL.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Unsupported document format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// A leaf value as it appears in the source. Sources mix numbers and strings
/// freely (`"year-from": 2004` next to `"volume": "1.6"`), so both are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for SourceValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for SourceValue {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceBrand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub models: Vec<SourceModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceModel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub year_from: Option<SourceValue>,
    #[serde(default)]
    pub year_to: Option<SourceValue>,
    #[serde(default)]
    pub generations: Vec<SourceGeneration>,
}

impl SourceModel {
    /// Body type of the first configuration of the first generation, if the
    /// hierarchy is deep enough to have one.
    pub fn first_body_type(&self) -> Option<&str> {
        self.generations
            .first()?
            .configurations
            .first()?
            .body_type
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceGeneration {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year_start: Option<SourceValue>,
    #[serde(default)]
    pub year_stop: Option<SourceValue>,
    #[serde(default)]
    pub configurations: Vec<SourceConfiguration>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfiguration {
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub modifications: Vec<SourceModification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceModification {
    #[serde(default)]
    pub specifications: SourceSpecifications,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSpecifications {
    #[serde(default)]
    pub engine_type: Option<SourceValue>,
    #[serde(default)]
    pub horse_power: Option<SourceValue>,
    #[serde(default)]
    pub transmission: Option<SourceValue>,
    #[serde(default)]
    pub drive: Option<SourceValue>,
    #[serde(default)]
    pub volume: Option<SourceValue>,
    #[serde(default)]
    pub consumption_mixed: Option<SourceValue>,
    #[serde(default)]
    pub max_speed: Option<SourceValue>,
}

/// Parse a JSON document (a top-level array of brands).
pub fn parse_json(contents: &str) -> Result<Vec<SourceBrand>, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Parse a YAML document (a top-level sequence of brands).
pub fn parse_yaml(contents: &str) -> Result<Vec<SourceBrand>, serde_yml::Error> {
    serde_yml::from_str(contents)
}

/// Load a source document, picking the parser by file extension.
pub fn load_document(path: &Path) -> Result<Vec<SourceBrand>, DocumentError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !matches!(ext.as_str(), "json" | "yaml" | "yml") {
        return Err(DocumentError::UnsupportedFormat(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    if ext == "json" {
        parse_json(&contents).map_err(|e| DocumentError::Json {
            path: path.display().to_string(),
            source: e,
        })
    } else {
        parse_yaml(&contents).map_err(|e| DocumentError::Yaml {
            path: path.display().to_string(),
            source: e,
        })
    }
}

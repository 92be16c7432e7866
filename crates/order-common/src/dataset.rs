//! Dataset kinds that downloadable layers are organised under.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thematic collection of a layer. Layer identifiers look like
/// `<collection>:<layer_name>`, e.g. `exposure:res1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    Exposure,
    Hazard,
    Vulnerability,
}

impl DatasetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Exposure => "exposure",
            DatasetType::Hazard => "hazard",
            DatasetType::Vulnerability => "vulnerability",
        }
    }

    /// Name of the processing option that carries the output format for
    /// this collection.
    pub fn format_option_name(&self) -> &'static str {
        match self {
            DatasetType::Vulnerability => "vulnerabilityFormat",
            _ => "format",
        }
    }

    /// Split a layer identifier into its collection token and layer name.
    /// Without a `:` the whole identifier is the collection token.
    pub fn split_layer(layer: &str) -> (&str, &str) {
        layer.split_once(':').unwrap_or((layer, ""))
    }

    /// Dataset kind of a layer identifier, if its collection is known.
    pub fn from_layer(layer: &str) -> Option<Self> {
        Self::split_layer(layer).0.parse().ok()
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetType {
    type Err = UnknownDatasetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exposure" => Ok(DatasetType::Exposure),
            "hazard" => Ok(DatasetType::Hazard),
            "vulnerability" => Ok(DatasetType::Vulnerability),
            other => Err(UnknownDatasetType(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown dataset type: {0}")]
pub struct UnknownDatasetType(pub String);

//! Order API configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use order_common::bbox::LONGITUDE_RANGE;

/// Largest number of steps a snapping grid may have along the longitude axis.
const MAX_GRID_STEPS: f64 = 1e7;

/// Service configuration loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderApiConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralSettings,

    /// Processing options offered by the order backend, with their allowed values.
    #[serde(default)]
    pub processing_options: Vec<ProcessingOption>,

    /// Exposure specific settings.
    #[serde(default)]
    pub exposures: ExposureSettings,

    /// Base URL that download links are built on. Defaults to
    /// `<base_url>/download` when unset.
    #[serde(default)]
    pub download_base_url: Option<String>,
}

impl OrderApiConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: defaults are used, which accept no
    /// format and disable bbox snapping.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                "Order API config file {:?} does not exist, using defaults",
                path
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        tracing::info!(
            processing_options = config.processing_options.len(),
            taxonomy_types = config.exposures.taxonomy_mappings.mapping.len(),
            bbox_snap_resolution = ?config.general.bbox_snap_resolution,
            "Loaded order API config from {:?}",
            path
        );

        Ok(config)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if let Some(resolution) = self.general.bbox_snap_resolution {
            if !(resolution.is_finite() && resolution > 0.0) {
                anyhow::bail!(
                    "general.bbox_snap_resolution must be a positive number, got {}",
                    resolution
                );
            }
            let steps = (LONGITUDE_RANGE.1 - LONGITUDE_RANGE.0) / resolution;
            if steps > MAX_GRID_STEPS {
                anyhow::bail!(
                    "general.bbox_snap_resolution {} is too fine: the grid would have {:.0} steps (max {})",
                    resolution,
                    steps,
                    MAX_GRID_STEPS
                );
            }
        }
        Ok(())
    }

    /// Allowed values of a processing option, `None` if the option is not configured.
    pub fn option_choices(&self, option_name: &str) -> Option<&[String]> {
        self.processing_options
            .iter()
            .find(|option| option.name == option_name)
            .map(|option| option.choices.as_slice())
    }

    /// The exposure taxonomy: category type -> category name -> definition.
    pub fn taxonomy(&self) -> &BTreeMap<String, BTreeMap<String, serde_yaml::Value>> {
        &self.exposures.taxonomy_mappings.mapping
    }
}

/// General settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Resolution (degrees) of the grid requested bboxes are snapped to.
    /// Snapping is disabled when unset.
    #[serde(default)]
    pub bbox_snap_resolution: Option<f64>,
}

/// A processing option of the order backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOption {
    /// Option name (e.g. "format", "vulnerabilityFormat").
    pub name: String,

    /// Allowed values.
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Exposure specific settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExposureSettings {
    #[serde(default)]
    pub taxonomy_mappings: TaxonomyMappings,
}

/// Taxonomic categories that exposure orders can be filtered by.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyMappings {
    #[serde(default)]
    pub mapping: BTreeMap<String, BTreeMap<String, serde_yaml::Value>>,
}

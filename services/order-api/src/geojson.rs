//! GeoJSON Feature types for catalog responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection<P> {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// A GeoJSON Feature with typed properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature<P> {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub id: Value,

    /// Geometry object, `null` for features without a location.
    pub geometry: Option<Value>,

    pub properties: P,
}

impl<P> Feature<P> {
    pub fn new(id: impl Into<Value>, geometry: Option<Value>, properties: P) -> Self {
        Self {
            type_: "Feature".to_string(),
            id: id.into(),
            geometry,
            properties,
        }
    }
}

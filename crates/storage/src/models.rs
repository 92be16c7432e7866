//! Records read from the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use order_common::DatasetType;

/// An order as persisted by the order-processing backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub status: String,
    pub additional_status_info: Option<String>,
    pub created_on: DateTime<Utc>,
}

/// One item of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: i64,
    pub order_id: i64,
    /// Product identifier, `<collection>:<layer_name>`.
    pub identifier: String,
    pub status: String,
    pub additional_status_info: Option<String>,
    pub created_on: DateTime<Utc>,
    pub expires_on: Option<DateTime<Utc>>,
    /// Whether the produced file can be downloaded.
    pub available: bool,
    /// Location of the produced file, set once processing finished.
    pub url: Option<String>,
    /// Processing options the item was ordered with, keyed by option name.
    pub export_options: Map<String, Value>,
}

impl OrderItemRecord {
    /// Dataset kind from the collection part of the identifier.
    pub fn dataset_type(&self) -> Option<DatasetType> {
        DatasetType::from_layer(&self.identifier)
    }

    /// Look up an export option, `None` when missing or null.
    pub fn export_option(&self, name: &str) -> Option<&Value> {
        self.export_options.get(name).filter(|v| !v.is_null())
    }

    /// Last non-empty path segment of the item URL, used to build download links.
    pub fn file_hash(&self) -> Option<&str> {
        self.url
            .as_deref()?
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
    }
}

/// An administrative boundary (country, province, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdministrativeDivisionRecord {
    pub id: i64,
    pub level: i32,
    pub iso: Option<String>,
    pub name: String,
    pub name_eng: Option<String>,
    pub name_local: Option<String>,
    pub division_type: Option<String>,
    pub engtype: Option<String>,
    pub unregion: Option<String>,
    pub population: Option<i64>,
    pub sqkm: Option<f64>,
    pub pop_sqkm: Option<f64>,
    pub region_id: Option<i64>,
    pub parent_id: Option<i64>,
    /// Ids of the dataset representations covering this division.
    pub dataset_ids: Vec<i64>,
    /// GeoJSON geometry.
    pub geometry: Option<Value>,
}

/// A named grouping of administrative divisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub id: i64,
    pub name: String,
    pub level: i32,
}

/// Footprint of a downloadable dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRepresentationRecord {
    pub id: i64,
    pub name: String,
    pub dataset_type: String,
    /// GeoJSON geometry.
    pub geometry: Option<Value>,
}

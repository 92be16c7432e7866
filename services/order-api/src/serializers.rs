//! JSON and GeoJSON representations of catalog records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use order_common::DatasetType;
use storage::{
    AdministrativeDivisionRecord, DatasetRepresentationRecord, OrderItemRecord, OrderRecord,
    RegionRecord,
};

use crate::geojson::{Feature, FeatureCollection};

/// Builds absolute resource URLs.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    base_url: String,
    download_base_url: String,
}

impl ApiUrls {
    /// `base_url` is the API root (e.g. `http://host/api`); download links
    /// default to `<base_url>/download`.
    pub fn new(base_url: impl Into<String>, download_base_url: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let download_base_url = download_base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{}/download", base_url));
        Self {
            base_url,
            download_base_url,
        }
    }

    pub fn order(&self, id: i64) -> String {
        format!("{}/orders/{}", self.base_url, id)
    }

    pub fn order_item(&self, id: i64) -> String {
        format!("{}/order-items/{}", self.base_url, id)
    }

    pub fn administrative_division(&self, id: i64) -> String {
        format!("{}/administrative-divisions/{}", self.base_url, id)
    }

    pub fn region(&self, id: i64) -> String {
        format!("{}/regions/{}", self.base_url, id)
    }

    pub fn dataset(&self, id: i64) -> String {
        format!("{}/datasets/{}", self.base_url, id)
    }

    pub fn download(&self, file_hash: &str) -> String {
        format!("{}/{}", self.download_base_url, file_hash)
    }
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: String,
    pub status: String,
    pub additional_status_info: Option<String>,
    pub created_on: DateTime<Utc>,
    pub order_items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: String,
    pub status: String,
    pub additional_status_info: Option<String>,
    pub layer: String,
    pub created_on: DateTime<Utc>,
    pub expires_on: Option<DateTime<Utc>>,
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

/// Dataset specific fields, read from the item's export options.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ItemDetails {
    Exposure {
        format: Option<Value>,
        bbox: Option<Value>,
        taxonomic_categories: Option<Value>,
    },
    Hazard {
        format: Option<Value>,
        bbox: Option<Value>,
        event_ids: Option<Value>,
    },
    Vulnerability {
        format: Option<Value>,
    },
    Generic {},
}

type DetailsRenderer = fn(&OrderItemRecord) -> ItemDetails;

fn exposure_details(item: &OrderItemRecord) -> ItemDetails {
    ItemDetails::Exposure {
        format: item.export_option("format").cloned(),
        bbox: item.export_option("bbox").cloned(),
        taxonomic_categories: item.export_option("exposureTaxonomicCategory").cloned(),
    }
}

fn hazard_details(item: &OrderItemRecord) -> ItemDetails {
    ItemDetails::Hazard {
        format: item.export_option("format").cloned(),
        bbox: item.export_option("bbox").cloned(),
        event_ids: item.export_option("hazardEventId").cloned(),
    }
}

fn vulnerability_details(item: &OrderItemRecord) -> ItemDetails {
    ItemDetails::Vulnerability {
        format: item.export_option("vulnerabilityFormat").cloned(),
    }
}

fn generic_details(_: &OrderItemRecord) -> ItemDetails {
    ItemDetails::Generic {}
}

/// Renderer for the dataset kind of an item, generic for unknown collections.
pub fn details_renderer(kind: Option<DatasetType>) -> DetailsRenderer {
    match kind {
        Some(DatasetType::Exposure) => exposure_details,
        Some(DatasetType::Hazard) => hazard_details,
        Some(DatasetType::Vulnerability) => vulnerability_details,
        None => generic_details,
    }
}

/// Render an order item. `download_url` is only set once the produced file
/// is available.
pub fn render_order_item(item: &OrderItemRecord, urls: &ApiUrls) -> OrderItemView {
    let download_url = if item.available {
        item.file_hash().map(|hash| urls.download(hash))
    } else {
        None
    };

    OrderItemView {
        id: urls.order_item(item.id),
        status: item.status.clone(),
        additional_status_info: item.additional_status_info.clone(),
        layer: item.identifier.clone(),
        created_on: item.created_on,
        expires_on: item.expires_on,
        download_url,
        details: details_renderer(item.dataset_type())(item),
    }
}

/// Render an order with its items.
pub fn render_order(order: &OrderRecord, items: &[OrderItemRecord], urls: &ApiUrls) -> OrderView {
    OrderView {
        id: urls.order(order.id),
        status: order.status.clone(),
        additional_status_info: order.additional_status_info.clone(),
        created_on: order.created_on,
        order_items: items
            .iter()
            .map(|item| render_order_item(item, urls))
            .collect(),
    }
}

// ============================================================================
// Administrative divisions
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DivisionDetailProperties {
    pub url: String,
    pub level: i32,
    pub iso: Option<String>,
    pub name: String,
    pub name_eng: Option<String>,
    pub name_local: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub engtype: Option<String>,
    pub unregion: Option<String>,
    pub population: Option<i64>,
    pub sqkm: Option<f64>,
    pub pop_sqkm: Option<f64>,
    pub region: Option<String>,
    pub parent: Option<String>,
    pub datasets: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DivisionListProperties {
    pub url: String,
    pub level: i32,
    pub iso: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub unregion: Option<String>,
    pub region: Option<String>,
    pub parent: Option<String>,
    pub datasets: Vec<String>,
}

fn division_links(
    division: &AdministrativeDivisionRecord,
    urls: &ApiUrls,
) -> (Option<String>, Option<String>, Vec<String>) {
    (
        division.region_id.map(|id| urls.region(id)),
        division.parent_id.map(|id| urls.administrative_division(id)),
        division.dataset_ids.iter().map(|id| urls.dataset(*id)).collect(),
    )
}

/// Full representation of a single division.
pub fn render_division_detail(
    division: &AdministrativeDivisionRecord,
    urls: &ApiUrls,
) -> Feature<DivisionDetailProperties> {
    let (region, parent, datasets) = division_links(division, urls);
    Feature::new(
        division.id,
        division.geometry.clone(),
        DivisionDetailProperties {
            url: urls.administrative_division(division.id),
            level: division.level,
            iso: division.iso.clone(),
            name: division.name.clone(),
            name_eng: division.name_eng.clone(),
            name_local: division.name_local.clone(),
            type_: division.division_type.clone(),
            engtype: division.engtype.clone(),
            unregion: division.unregion.clone(),
            population: division.population,
            sqkm: division.sqkm,
            pop_sqkm: division.pop_sqkm,
            region,
            parent,
            datasets,
        },
    )
}

/// Condensed representation of many divisions.
pub fn render_division_list(
    divisions: &[AdministrativeDivisionRecord],
    urls: &ApiUrls,
) -> FeatureCollection<DivisionListProperties> {
    let features = divisions
        .iter()
        .map(|division| {
            let (region, parent, datasets) = division_links(division, urls);
            Feature::new(
                division.id,
                division.geometry.clone(),
                DivisionListProperties {
                    url: urls.administrative_division(division.id),
                    level: division.level,
                    iso: division.iso.clone(),
                    name: division.name.clone(),
                    type_: division.division_type.clone(),
                    unregion: division.unregion.clone(),
                    region,
                    parent,
                    datasets,
                },
            )
        })
        .collect();
    FeatureCollection::new(features)
}

// ============================================================================
// Regions and dataset representations
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegionView {
    pub url: String,
    pub name: String,
    pub level: i32,
}

pub fn render_region(region: &RegionRecord, urls: &ApiUrls) -> RegionView {
    RegionView {
        url: urls.region(region.id),
        name: region.name.clone(),
        level: region.level,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetProperties {
    pub url: String,
    pub name: String,
    pub dataset_type: String,
}

pub fn render_dataset(
    dataset: &DatasetRepresentationRecord,
    urls: &ApiUrls,
) -> Feature<DatasetProperties> {
    Feature::new(
        dataset.id,
        dataset.geometry.clone(),
        DatasetProperties {
            url: urls.dataset(dataset.id),
            name: dataset.name.clone(),
            dataset_type: dataset.dataset_type.clone(),
        },
    )
}

pub fn render_dataset_list(
    datasets: &[DatasetRepresentationRecord],
    urls: &ApiUrls,
) -> FeatureCollection<DatasetProperties> {
    FeatureCollection::new(datasets.iter().map(|d| render_dataset(d, urls)).collect())
}

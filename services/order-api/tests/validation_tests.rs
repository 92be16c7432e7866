//! Tests for order request validation.

use serde_json::json;

use order_api::config::OrderApiConfig;
use order_api::validation::{validate_item, validate_order, OrderItemRequest, OrderRequest};
use order_common::{BoundingBox, DatasetType};

const CONFIG: &str = r#"
processing_options:
  - name: format
    choices: [geotiff, shapefile]
  - name: vulnerabilityFormat
    choices: [csv]
exposures:
  taxonomy_mappings:
    mapping:
      structural:
        concrete: [CR]
        masonry: [MUR]
      occupancy:
        residential: [RES]
"#;

fn config() -> OrderApiConfig {
    OrderApiConfig::from_yaml(CONFIG).unwrap()
}

fn snapping_config(resolution: f64) -> OrderApiConfig {
    let mut config = config();
    config.general.bbox_snap_resolution = Some(resolution);
    config
}

fn item(value: serde_json::Value) -> OrderItemRequest {
    serde_json::from_value(value).unwrap()
}

fn error_field(value: serde_json::Value, config: &OrderApiConfig) -> String {
    validate_item(&item(value), config)
        .unwrap_err()
        .field()
        .unwrap()
        .to_string()
}

// ============================================================================
// Order level
// ============================================================================

#[test]
fn test_missing_order_items() {
    let err = validate_order(&OrderRequest::default(), &config()).unwrap_err();
    assert_eq!(err.field(), Some("order_items"));
    assert_eq!(err.to_string(), "Invalid value for 'order_items': this field is required");
}

#[test]
fn test_empty_order_items() {
    let request: OrderRequest = serde_json::from_value(json!({ "order_items": [] })).unwrap();
    let err = validate_order(&request, &config()).unwrap_err();
    assert_eq!(err.field(), Some("order_items"));
}

#[test]
fn test_first_failing_item_is_reported() {
    let request: OrderRequest = serde_json::from_value(json!({
        "order_items": [
            { "layer": "exposure:res1", "format": "geotiff" },
            { "layer": "hazard:flood", "format": "bogus" },
            { "layer": "nope:x", "format": "geotiff" }
        ]
    }))
    .unwrap();
    let err = validate_order(&request, &config()).unwrap_err();
    assert_eq!(err.field(), Some("format"));
}

#[test]
fn test_notification_email_carried_over() {
    let request: OrderRequest = serde_json::from_value(json!({
        "order_items": [{ "layer": "exposure:res1", "format": "geotiff" }],
        "notification_email": "someone@example.org"
    }))
    .unwrap();
    let order = validate_order(&request, &config()).unwrap();
    assert_eq!(order.order_items.len(), 1);
    assert_eq!(order.notification_email.as_deref(), Some("someone@example.org"));
}

// ============================================================================
// Layer and format
// ============================================================================

#[test]
fn test_exposure_geotiff_accepted() {
    let validated = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "geotiff" })),
        &config(),
    )
    .unwrap();
    assert_eq!(validated.collection, DatasetType::Exposure);
    assert_eq!(validated.layer_name, "res1");
    assert_eq!(validated.format, "geotiff");
    assert!(validated.bbox.is_none());
}

#[test]
fn test_format_is_lowercased() {
    let validated = validate_item(
        &item(json!({ "layer": "hazard:flood", "format": "GeoTIFF" })),
        &config(),
    )
    .unwrap();
    assert_eq!(validated.format, "geotiff");
}

#[test]
fn test_bogus_format_rejected() {
    let err = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "bogus" })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.field(), Some("format"));
    assert_eq!(err.to_string(), "Invalid value for 'format': invalid value");
}

#[test]
fn test_missing_format() {
    let err = validate_item(&item(json!({ "layer": "exposure:res1" })), &config()).unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'format': this field is required");
}

#[test]
fn test_missing_layer() {
    assert_eq!(error_field(json!({ "format": "geotiff" }), &config()), "layer");
}

#[test]
fn test_unknown_collection() {
    let err = validate_item(
        &item(json!({ "layer": "roads:primary", "format": "geotiff" })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'layer': invalid collection");
}

#[test]
fn test_vulnerability_uses_its_own_format_option() {
    let validated = validate_item(
        &item(json!({ "layer": "vulnerability:curves", "format": "CSV" })),
        &config(),
    )
    .unwrap();
    assert_eq!(validated.format, "csv");

    // geotiff is only offered for exposure and hazard
    assert_eq!(
        error_field(json!({ "layer": "vulnerability:curves", "format": "geotiff" }), &config()),
        "format"
    );
}

#[test]
fn test_unconfigured_format_option_rejects() {
    let config = OrderApiConfig::default();
    assert_eq!(
        error_field(json!({ "layer": "exposure:res1", "format": "geotiff" }), &config),
        "format"
    );
}

// ============================================================================
// Bounding box
// ============================================================================

#[test]
fn test_bbox_wrong_arity() {
    let err = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "geotiff", "bbox": "a,b,c" })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.field(), Some("bbox"));
}

#[test]
fn test_bbox_out_of_range() {
    let err = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "geotiff", "bbox": "0,0,10,95" })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'bbox': Invalid values. Expecting x0,y0,x1,y1");
}

#[test]
fn test_bbox_kept_verbatim_without_snapping() {
    let validated = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "geotiff", "bbox": "10.3,20.7,15.1,25.2" })),
        &config(),
    )
    .unwrap();
    assert_eq!(validated.bbox, Some(BoundingBox::new(10.3, 20.7, 15.1, 25.2)));
}

#[test]
fn test_bbox_snapped_when_configured() {
    let validated = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "geotiff", "bbox": "10.3,20.7,15.1,25.2" })),
        &snapping_config(0.5),
    )
    .unwrap();
    assert_eq!(validated.bbox, Some(BoundingBox::new(10.0, 20.5, 15.5, 25.5)));
}

#[test]
fn test_snapped_bbox_contains_request() {
    let requested = BoundingBox::new(-12.34, 5.67, 8.91, 33.33);
    for resolution in [0.25, 1.0, 2.0] {
        let validated = validate_item(
            &item(json!({
                "layer": "hazard:flood",
                "format": "geotiff",
                "bbox": requested.to_order_string()
            })),
            &snapping_config(resolution),
        )
        .unwrap();
        let snapped = validated.bbox.unwrap();
        assert!(snapped.contains(&requested), "resolution {}", resolution);
    }
}

// ============================================================================
// Taxonomic categories
// ============================================================================

#[test]
fn test_known_category_accepted() {
    let validated = validate_item(
        &item(json!({
            "layer": "exposure:res1",
            "format": "geotiff",
            "taxonomic_categories": "structural:concrete"
        })),
        &config(),
    )
    .unwrap();
    assert_eq!(
        validated.taxonomic_categories,
        Some(vec!["structural:concrete".to_string()])
    );
}

#[test]
fn test_categories_normalized() {
    let validated = validate_item(
        &item(json!({
            "layer": "exposure:res1",
            "format": "geotiff",
            "taxonomic_categories": "Structural:Concrete, occupancy:RESIDENTIAL"
        })),
        &config(),
    )
    .unwrap();
    assert_eq!(
        validated.taxonomic_categories,
        Some(vec![
            "structural:concrete".to_string(),
            "occupancy:residential".to_string()
        ])
    );
}

#[test]
fn test_categories_as_list() {
    let validated = validate_item(
        &item(json!({
            "layer": "exposure:res1",
            "format": "geotiff",
            "taxonomic_categories": ["structural:masonry"]
        })),
        &config(),
    )
    .unwrap();
    assert_eq!(
        validated.taxonomic_categories,
        Some(vec!["structural:masonry".to_string()])
    );
}

#[test]
fn test_unknown_category_type_rejected() {
    let err = validate_item(
        &item(json!({
            "layer": "exposure:res1",
            "format": "geotiff",
            "taxonomic_categories": "unknown:x"
        })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.field(), Some("taxonomic_categories"));
}

#[test]
fn test_unknown_category_value_rejected() {
    assert_eq!(
        error_field(
            json!({
                "layer": "exposure:res1",
                "format": "geotiff",
                "taxonomic_categories": "structural:adobe"
            }),
            &config()
        ),
        "taxonomic_categories"
    );
}

#[test]
fn test_malformed_category_rejected() {
    for raw in ["structural", "a:b:c"] {
        assert_eq!(
            error_field(
                json!({ "layer": "exposure:res1", "format": "geotiff", "taxonomic_categories": raw }),
                &config()
            ),
            "taxonomic_categories"
        );
    }
}

#[test]
fn test_categories_ignored_for_hazard() {
    let validated = validate_item(
        &item(json!({
            "layer": "hazard:flood",
            "format": "geotiff",
            "taxonomic_categories": "unknown:x"
        })),
        &config(),
    )
    .unwrap();
    assert!(validated.taxonomic_categories.is_none());
}

// ============================================================================
// Event ids
// ============================================================================

#[test]
fn test_event_ids_parsed() {
    let validated = validate_item(
        &item(json!({ "layer": "hazard:flood", "format": "geotiff", "event_ids": ["12", "34"] })),
        &config(),
    )
    .unwrap();
    assert_eq!(validated.event_ids, Some(vec![12, 34]));
}

#[test]
fn test_event_ids_invalid() {
    let err = validate_item(
        &item(json!({ "layer": "hazard:flood", "format": "geotiff", "event_ids": ["12", "x"] })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'event_ids': Invalid values");
}

#[test]
fn test_event_ids_ignored_for_exposure() {
    let validated = validate_item(
        &item(json!({ "layer": "exposure:res1", "format": "geotiff", "event_ids": ["x"] })),
        &config(),
    )
    .unwrap();
    assert!(validated.event_ids.is_none());
}

// ============================================================================
// Field shapes
// ============================================================================

#[test]
fn test_non_string_bbox_is_tagged() {
    let err = validate_item(
        &item(json!({ "layer": "hazard:flood", "format": "geotiff", "bbox": 5 })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'bbox': Invalid numeric values");
}

#[test]
fn test_non_array_event_ids_is_tagged() {
    let err = validate_item(
        &item(json!({ "layer": "hazard:flood", "format": "geotiff", "event_ids": "12" })),
        &config(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for 'event_ids': Invalid values");
}

#[test]
fn test_non_string_layer_and_format_are_tagged() {
    assert_eq!(error_field(json!({ "layer": 3, "format": "geotiff" }), &config()), "layer");
    assert_eq!(
        error_field(json!({ "layer": "hazard:flood", "format": ["geotiff"] }), &config()),
        "format"
    );
}

#[test]
fn test_null_fields_count_as_missing() {
    let validated = validate_item(
        &item(json!({
            "layer": "hazard:flood",
            "format": "geotiff",
            "bbox": null,
            "event_ids": null
        })),
        &config(),
    )
    .unwrap();
    assert!(validated.bbox.is_none());
    assert!(validated.event_ids.is_none());
}

#[test]
fn test_whole_number_event_ids_accepted() {
    let validated = validate_item(
        &item(json!({ "layer": "hazard:flood", "format": "geotiff", "event_ids": [12.0, "34"] })),
        &config(),
    )
    .unwrap();
    assert_eq!(validated.event_ids, Some(vec![12, 34]));
}

//! Tests for mapping validated orders onto OSEO Submit requests.

use order_api::submission::build_submit_request;
use order_api::validation::{ValidatedOrder, ValidatedOrderItem};
use order_common::{BoundingBox, DatasetType};
use oseo_protocol::StatusNotification;

fn exposure_item() -> ValidatedOrderItem {
    ValidatedOrderItem {
        layer: "exposure:res1".to_string(),
        collection: DatasetType::Exposure,
        layer_name: "res1".to_string(),
        format: "geotiff".to_string(),
        bbox: Some(BoundingBox::new(10.0, 20.5, 15.5, 25.5)),
        taxonomic_categories: Some(vec![
            "structural:concrete".to_string(),
            "occupancy:residential".to_string(),
        ]),
        event_ids: None,
    }
}

fn vulnerability_item() -> ValidatedOrderItem {
    ValidatedOrderItem {
        layer: "vulnerability:curves".to_string(),
        collection: DatasetType::Vulnerability,
        layer_name: "curves".to_string(),
        format: "csv".to_string(),
        bbox: None,
        taxonomic_categories: None,
        event_ids: None,
    }
}

#[test]
fn test_items_numbered_in_order() {
    let order = ValidatedOrder {
        order_items: vec![exposure_item(), vulnerability_item()],
        notification_email: None,
    };
    let request = build_submit_request(&order);

    assert_eq!(request.items.len(), 2);
    assert_eq!(request.items[0].item_id, "item0");
    assert_eq!(request.items[0].collection_id, "exposure");
    assert_eq!(request.items[1].item_id, "item1");
    assert_eq!(request.items[1].product_id, "vulnerability:curves");
    assert_eq!(request.status_notification, StatusNotification::None);
    assert!(request.options.is_empty());
}

#[test]
fn test_exposure_options() {
    let order = ValidatedOrder {
        order_items: vec![exposure_item()],
        notification_email: None,
    };
    let xml = build_submit_request(&order).to_xml().unwrap();

    assert!(xml.contains("<format>geotiff</format>"));
    assert!(xml.contains("<bbox>10,20.5,15.5,25.5</bbox>"));
    assert!(xml.contains("<exposureTaxonomicCategory>structural:concrete</exposureTaxonomicCategory>"));
    assert!(xml.contains("<exposureTaxonomicCategory>occupancy:residential</exposureTaxonomicCategory>"));
}

#[test]
fn test_vulnerability_format_option_name() {
    let order = ValidatedOrder {
        order_items: vec![vulnerability_item()],
        notification_email: None,
    };
    let xml = build_submit_request(&order).to_xml().unwrap();

    assert!(xml.contains("<vulnerabilityFormat>csv</vulnerabilityFormat>"));
    assert!(!xml.contains("<format>"));
    assert!(!xml.contains("<bbox>"));
}

#[test]
fn test_notification_email_enables_status_notification() {
    let order = ValidatedOrder {
        order_items: vec![vulnerability_item()],
        notification_email: Some("someone@example.org".to_string()),
    };
    let request = build_submit_request(&order);

    assert_eq!(request.status_notification, StatusNotification::All);
    assert_eq!(request.options[0].name, "notificationEmail");
    assert_eq!(request.options[0].value, "someone@example.org");
}

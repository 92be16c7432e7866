//! Validation of incoming order requests.
//!
//! Every failure is reported as [`OrderError::Validation`] tagged with the
//! offending request field. The first failure wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use order_common::{snap_bbox_to_grid, BoundingBox, DatasetType, OrderError, OrderResult};

use crate::config::OrderApiConfig;

const REQUIRED: &str = "this field is required";

/// Order request body as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub order_items: Option<Vec<OrderItemRequest>>,

    #[serde(default)]
    pub notification_email: Option<String>,
}

/// One requested item, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemRequest {
    // Loosely typed: `validate_item` reports shape errors per field.
    /// Layer identifier, `<collection>:<layer_name>`.
    #[serde(default)]
    pub layer: Option<Value>,

    #[serde(default)]
    pub format: Option<Value>,

    /// "x0,y0,x1,y1"
    #[serde(default)]
    pub bbox: Option<Value>,

    /// Comma separated `category_type:category_name` tokens. Exposure only.
    #[serde(default)]
    pub taxonomic_categories: Option<Value>,

    /// Integer event ids, as numbers or strings. Hazard only.
    #[serde(default)]
    pub event_ids: Option<Value>,
}

/// A validated order, ready to be submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedOrder {
    pub order_items: Vec<ValidatedOrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
}

/// A validated order item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedOrderItem {
    pub layer: String,
    pub collection: DatasetType,
    pub layer_name: String,
    /// Lower-cased output format.
    pub format: String,
    /// Requested extent, snapped to the grid when snapping is enabled.
    pub bbox: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomic_categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ids: Option<Vec<i64>>,
}

/// Validate and normalize an order request.
pub fn validate_order(request: &OrderRequest, config: &OrderApiConfig) -> OrderResult<ValidatedOrder> {
    let requested_items = match request.order_items.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(OrderError::validation("order_items", REQUIRED)),
    };

    let order_items = requested_items
        .iter()
        .map(|item| validate_item(item, config))
        .collect::<OrderResult<Vec<_>>>()?;

    Ok(ValidatedOrder {
        order_items,
        notification_email: request.notification_email.clone(),
    })
}

/// Validate a single order item.
pub fn validate_item(item: &OrderItemRequest, config: &OrderApiConfig) -> OrderResult<ValidatedOrderItem> {
    let layer = match present(&item.layer) {
        Some(Value::String(layer)) if !layer.is_empty() => layer.as_str(),
        Some(Value::String(_)) | None => return Err(OrderError::validation("layer", REQUIRED)),
        Some(_) => return Err(OrderError::validation("layer", "invalid collection")),
    };
    let (collection, layer_name) = parse_layer(layer)?;

    let format = match present(&item.format) {
        Some(Value::String(format)) => format.to_lowercase(),
        Some(_) => return Err(OrderError::validation("format", "invalid value")),
        None => String::new(),
    };
    if format.is_empty() {
        return Err(OrderError::validation("format", REQUIRED));
    }
    validate_format(&format, collection, config)?;

    let bbox = match present(&item.bbox) {
        Some(Value::String(raw)) if raw.is_empty() => None,
        Some(Value::String(raw)) => {
            let parsed = parse_bbox(raw)?;
            match config.general.bbox_snap_resolution {
                Some(resolution) => Some(snap_bbox_to_grid(resolution, &parsed)?),
                None => Some(parsed),
            }
        }
        Some(_) => return Err(OrderError::validation("bbox", "Invalid numeric values")),
        None => None,
    };

    let mut validated = ValidatedOrderItem {
        layer: layer.to_string(),
        collection,
        layer_name: layer_name.to_string(),
        format,
        bbox,
        taxonomic_categories: None,
        event_ids: None,
    };

    match collection {
        DatasetType::Exposure => {
            if let Some(raw) = present(&item.taxonomic_categories) {
                validated.taxonomic_categories = Some(parse_categories(raw, config)?);
            }
        }
        DatasetType::Hazard => {
            match present(&item.event_ids) {
                Some(Value::Array(raw)) => validated.event_ids = Some(parse_event_ids(raw)?),
                Some(_) => return Err(OrderError::validation("event_ids", "Invalid values")),
                None => {}
            }
        }
        DatasetType::Vulnerability => {}
    }

    Ok(validated)
}

/// A field value, `None` when absent or null.
fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

/// Split a layer identifier and check its collection.
pub fn parse_layer(layer: &str) -> OrderResult<(DatasetType, &str)> {
    let (collection, layer_name) = DatasetType::split_layer(layer);
    let collection = collection
        .parse()
        .map_err(|_| OrderError::validation("layer", "invalid collection"))?;
    Ok((collection, layer_name))
}

/// Check a (lower-cased) format against the whitelist of its collection.
pub fn validate_format(format: &str, collection: DatasetType, config: &OrderApiConfig) -> OrderResult<()> {
    let allowed = config
        .option_choices(collection.format_option_name())
        .map(|choices| choices.iter().any(|choice| choice == format))
        .unwrap_or(false);

    if allowed {
        Ok(())
    } else {
        Err(OrderError::validation("format", "invalid value"))
    }
}

/// Parse and range check an "x0,y0,x1,y1" string.
pub fn parse_bbox(raw: &str) -> OrderResult<BoundingBox> {
    let bbox = BoundingBox::from_order_string(raw)
        .map_err(|_| OrderError::validation("bbox", "Invalid numeric values"))?;
    bbox.check_ranges()
        .map_err(|_| OrderError::validation("bbox", "Invalid values. Expecting x0,y0,x1,y1"))?;
    Ok(bbox)
}

/// Parse exposure taxonomic categories.
///
/// Accepts a comma separated string or a list of strings. Tokens are
/// lower-cased and must look like `category_type:category_name`, with both
/// parts present in the configured taxonomy.
pub fn parse_categories(raw: &Value, config: &OrderApiConfig) -> OrderResult<Vec<String>> {
    let tokens: Vec<String> = match raw {
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(values) => values
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    OrderError::validation("taxonomic_categories", format!("Invalid category {}", v))
                })
            })
            .collect::<OrderResult<_>>()?,
        other => {
            return Err(OrderError::validation(
                "taxonomic_categories",
                format!("Invalid category {}", other),
            ))
        }
    };

    let taxonomy = config.taxonomy();
    let mut categories = Vec::with_capacity(tokens.len());
    for token in tokens {
        let info = token.trim().to_lowercase();
        let parts: Vec<&str> = info.split(':').collect();
        let [category_type, category_value] = parts.as_slice() else {
            return Err(OrderError::validation(
                "taxonomic_categories",
                format!(
                    "Invalid category {:?}. Please provide a value of the form \
                     category_type:category_name",
                    info
                ),
            ));
        };

        let Some(allowed_values) = taxonomy.get(*category_type) else {
            return Err(OrderError::validation(
                "taxonomic_categories",
                format!("Invalid category type: {}", category_type),
            ));
        };
        if !allowed_values.contains_key(*category_value) {
            return Err(OrderError::validation(
                "taxonomic_categories",
                format!("Invalid category value: {}", category_value),
            ));
        }

        categories.push(info);
    }

    Ok(categories)
}

/// Parse hazard event ids. Each must be an integer, a whole-valued number
/// such as `12.0`, or an integer string.
pub fn parse_event_ids(raw: &[Value]) -> OrderResult<Vec<i64>> {
    raw.iter()
        .map(|value| {
            let parsed = match value {
                Value::Number(n) => n.as_i64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                }),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            };
            parsed.ok_or_else(|| OrderError::validation("event_ids", "Invalid values"))
        })
        .collect()
}

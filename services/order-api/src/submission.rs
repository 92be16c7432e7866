//! Submission of validated orders to the OSEO order-processing backend.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use order_common::{DatasetType, OrderError, OrderResult};
use oseo_protocol::{OseoError, StatusNotification, SubmitAck, SubmitOrderItem, SubmitRequest};

use crate::validation::ValidatedOrder;

/// Header used to tell the backend on whose behalf the order is placed.
pub const REMOTE_USER_HEADER: &str = "X-Remote-User";

/// Something that accepts OSEO `Submit` requests.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order and return the backend acknowledgement.
    async fn submit(&self, request: &SubmitRequest, user: Option<&str>) -> OrderResult<SubmitAck>;
}

/// Submits orders to an OSEO server over HTTP.
pub struct HttpOrderSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl OrderSubmitter for HttpOrderSubmitter {
    async fn submit(&self, request: &SubmitRequest, user: Option<&str>) -> OrderResult<SubmitAck> {
        let document = request.to_xml().map_err(submission_failed)?;
        debug!(endpoint = %self.endpoint, "Submitting order document:\n{}", document);

        let mut http_request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, oseo_protocol::MEDIA_TYPE)
            .body(document);
        if let Some(user) = user {
            http_request = http_request.header(REMOTE_USER_HEADER, user);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| OrderError::Submission(format!("Request to backend failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OrderError::Submission(format!("Failed to read backend response: {}", e)))?;

        match SubmitAck::from_xml(&body) {
            Ok(ack) => {
                info!(order_id = %ack.order_id, "Order accepted by backend");
                Ok(ack)
            }
            Err(e) => {
                warn!(http_status = %status, error = %e, "Order rejected by backend");
                Err(submission_failed(e))
            }
        }
    }
}

fn submission_failed(e: OseoError) -> OrderError {
    OrderError::Submission(e.to_string())
}

/// Map a validated order onto an OSEO `Submit` request.
///
/// Items are numbered `item0`, `item1`, ... in request order.
pub fn build_submit_request(order: &ValidatedOrder) -> SubmitRequest {
    let items = order
        .order_items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut submit_item =
                SubmitOrderItem::new(format!("item{}", index), &item.layer, item.collection.as_str())
                    .with_option(item.collection.format_option_name(), &item.format);

            if let Some(bbox) = &item.bbox {
                submit_item = submit_item.with_option("bbox", bbox.to_order_string());
            }
            if item.collection == DatasetType::Exposure {
                for category in item.taxonomic_categories.iter().flatten() {
                    submit_item = submit_item
                        .with_option("exposureTaxonomicCategory", category.to_lowercase());
                }
            }
            if item.collection == DatasetType::Hazard {
                for event_id in item.event_ids.iter().flatten() {
                    submit_item = submit_item.with_option("hazardEventId", event_id.to_string());
                }
            }
            submit_item
        })
        .collect();

    let mut request = SubmitRequest::new(items);
    if let Some(email) = &order.notification_email {
        request = request
            .with_option("notificationEmail", email)
            .with_status_notification(StatusNotification::All);
    }
    request
}

/// Parse the backend order id into the catalog key.
pub fn parse_order_id(ack: &SubmitAck) -> OrderResult<i64> {
    ack.order_id.trim().parse().map_err(|_| {
        OrderError::Submission(format!("Unexpected order id from backend: {}", ack.order_id))
    })
}

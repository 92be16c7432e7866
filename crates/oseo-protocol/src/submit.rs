//! OSEO `Submit` request documents.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::namespaces;
use crate::OseoError;

/// When the server should notify about order progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusNotification {
    None,
    All,
}

impl StatusNotification {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusNotification::None => "None",
            StatusNotification::All => "All",
        }
    }
}

/// A named processing option value. Multi-valued options are repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderOption {
    pub name: String,
    pub value: String,
}

impl OrderOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One product requested within an order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOrderItem {
    /// Client side identifier, unique within the order.
    pub item_id: String,
    /// Product identifier, e.g. `exposure:res1`.
    pub product_id: String,
    /// Collection the product belongs to.
    pub collection_id: String,
    pub options: Vec<OrderOption>,
}

impl SubmitOrderItem {
    pub fn new(
        item_id: impl Into<String>,
        product_id: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            product_id: product_id.into(),
            collection_id: collection_id.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(OrderOption::new(name, value));
        self
    }
}

/// A product order to be submitted to an OSEO server.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// Order level options (e.g. the notification e-mail address).
    pub options: Vec<OrderOption>,
    pub items: Vec<SubmitOrderItem>,
    pub status_notification: StatusNotification,
}

impl SubmitRequest {
    pub fn new(items: Vec<SubmitOrderItem>) -> Self {
        Self {
            options: Vec::new(),
            items,
            status_notification: StatusNotification::None,
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(OrderOption::new(name, value));
        self
    }

    pub fn with_status_notification(mut self, notification: StatusNotification) -> Self {
        self.status_notification = notification;
        self
    }

    /// Render the request as an OSEO 1.0 `Submit` document.
    pub fn to_xml(&self) -> Result<String, OseoError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("oseo:Submit");
        root.push_attribute(("xmlns:oseo", namespaces::OSEO));
        root.push_attribute(("service", "OS"));
        root.push_attribute(("version", "1.0.0"));
        write(&mut writer, Event::Start(root))?;

        start(&mut writer, "oseo:orderSpecification")?;
        write_options(&mut writer, &self.options)?;

        start(&mut writer, "oseo:deliveryOptions")?;
        start(&mut writer, "oseo:onlineDataAccess")?;
        text_element(&mut writer, "oseo:protocol", "http")?;
        end(&mut writer, "oseo:onlineDataAccess")?;
        end(&mut writer, "oseo:deliveryOptions")?;

        text_element(&mut writer, "oseo:orderType", "PRODUCT_ORDER")?;

        for item in &self.items {
            start(&mut writer, "oseo:orderItem")?;
            text_element(&mut writer, "oseo:itemId", &item.item_id)?;
            write_options(&mut writer, &item.options)?;
            start(&mut writer, "oseo:productId")?;
            text_element(&mut writer, "oseo:identifier", &item.product_id)?;
            text_element(&mut writer, "oseo:collectionId", &item.collection_id)?;
            end(&mut writer, "oseo:productId")?;
            end(&mut writer, "oseo:orderItem")?;
        }

        end(&mut writer, "oseo:orderSpecification")?;
        text_element(
            &mut writer,
            "oseo:statusNotification",
            self.status_notification.as_str(),
        )?;
        end(&mut writer, "oseo:Submit")?;

        String::from_utf8(writer.into_inner()).map_err(|e| OseoError::Xml(e.to_string()))
    }
}

fn write_options(writer: &mut Writer<Vec<u8>>, options: &[OrderOption]) -> Result<(), OseoError> {
    if options.is_empty() {
        return Ok(());
    }

    start(writer, "oseo:option")?;
    start(writer, "oseo:ParameterData")?;
    text_element(writer, "oseo:encoding", "XMLEncoding")?;
    start(writer, "oseo:values")?;
    for option in options {
        text_element(writer, &option.name, &option.value)?;
    }
    end(writer, "oseo:values")?;
    end(writer, "oseo:ParameterData")?;
    end(writer, "oseo:option")
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), OseoError> {
    writer
        .write_event(event)
        .map_err(|e| OseoError::Xml(e.to_string()))
}

fn start(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), OseoError> {
    write(writer, Event::Start(BytesStart::new(name)))
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), OseoError> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), OseoError> {
    start(writer, name)?;
    write(writer, Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_document_structure() {
        let item = SubmitOrderItem::new("item0", "exposure:res1", "exposure")
            .with_option("format", "geotiff")
            .with_option("bbox", "10,20.5,15.5,25.5");
        let xml = SubmitRequest::new(vec![item]).to_xml().unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<oseo:Submit xmlns:oseo=\"http://www.opengis.net/oseo/1.0\""));
        assert!(xml.contains("<oseo:itemId>item0</oseo:itemId>"));
        assert!(xml.contains("<oseo:identifier>exposure:res1</oseo:identifier>"));
        assert!(xml.contains("<oseo:collectionId>exposure</oseo:collectionId>"));
        assert!(xml.contains("<format>geotiff</format>"));
        assert!(xml.contains("<bbox>10,20.5,15.5,25.5</bbox>"));
        assert!(xml.contains("<oseo:statusNotification>None</oseo:statusNotification>"));
        assert!(xml.trim_end().ends_with("</oseo:Submit>"));
    }

    #[test]
    fn test_submit_escapes_text() {
        let request = SubmitRequest::new(Vec::new())
            .with_option("notificationEmail", "a&b<c>@example.com")
            .with_status_notification(StatusNotification::All);
        let xml = request.to_xml().unwrap();

        assert!(xml.contains("a&amp;b&lt;c&gt;@example.com"));
        assert!(xml.contains("<oseo:statusNotification>All</oseo:statusNotification>"));
    }

    #[test]
    fn test_item_without_options_has_no_option_block() {
        let item = SubmitOrderItem::new("item0", "vulnerability:v1", "vulnerability");
        let xml = SubmitRequest::new(vec![item]).to_xml().unwrap();
        assert!(!xml.contains("<oseo:option>"));
    }
}

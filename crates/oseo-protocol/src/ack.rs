//! OSEO `SubmitAck` responses and OWS exception reports.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::OseoError;

/// Acknowledgement of a successfully accepted `Submit` request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAck {
    pub status: String,
    /// Server side order identifier.
    pub order_id: String,
}

impl SubmitAck {
    /// Parse a server response.
    ///
    /// Accepts a `SubmitAck` whose status is `success`. Exception reports
    /// and any other status are turned into errors.
    pub fn from_xml(xml: &str) -> Result<Self, OseoError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current = Vec::new();
        let mut fields = AckFields::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => current = fields.read_element(&e)?,
                // Self-closing elements carry attributes only
                Ok(Event::Empty(e)) => {
                    fields.read_element(&e)?;
                }
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| OseoError::Xml(e.to_string()))?
                        .into_owned();
                    match current.as_slice() {
                        b"status" => fields.status = Some(text),
                        b"orderId" => fields.order_id = Some(text),
                        b"ExceptionText" => fields.exception_text = Some(text),
                        _ => {}
                    }
                }
                Ok(Event::End(_)) => current.clear(),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OseoError::Xml(format!(
                        "Error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        if fields.is_exception_report {
            return Err(OseoError::ExceptionReport {
                code: fields
                    .exception_code
                    .unwrap_or_else(|| "NoApplicableCode".to_string()),
                text: fields.exception_text.unwrap_or_default(),
            });
        }

        let status = fields.status.unwrap_or_else(|| "success".to_string());
        if status != "success" {
            return Err(OseoError::Rejected(status));
        }

        let order_id = fields.order_id.ok_or(OseoError::MissingOrderId)?;
        Ok(Self { status, order_id })
    }
}

#[derive(Default)]
struct AckFields {
    status: Option<String>,
    order_id: Option<String>,
    exception_code: Option<String>,
    exception_text: Option<String>,
    is_exception_report: bool,
}

impl AckFields {
    /// Record what an opening or self-closing element tells us and return its local name.
    fn read_element(&mut self, e: &BytesStart<'_>) -> Result<Vec<u8>, OseoError> {
        let name = e.local_name().as_ref().to_vec();
        match name.as_slice() {
            b"SubmitAck" => {
                // Some servers carry the status as an attribute
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"status" {
                        self.status = Some(unescape_attr(&attr)?);
                    }
                }
            }
            b"ExceptionReport" => self.is_exception_report = true,
            b"Exception" => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"exceptionCode" {
                        self.exception_code = Some(unescape_attr(&attr)?);
                    }
                }
            }
            _ => {}
        }
        Ok(name)
    }
}

fn unescape_attr(attr: &quick_xml::events::attributes::Attribute<'_>) -> Result<String, OseoError> {
    attr.unescape_value()
        .map(|v| v.into_owned())
        .map_err(|e| OseoError::Xml(e.to_string()))
}

//! OGC Ordering Services for Earth Observation Products (OSEO) 1.0.
//!
//! Only the part of the protocol needed to place orders is covered:
//! - writing `Submit` request documents
//! - reading `SubmitAck` responses and OWS exception reports

pub mod ack;
pub mod error;
pub mod submit;

pub use ack::SubmitAck;
pub use error::OseoError;
pub use submit::{OrderOption, StatusNotification, SubmitOrderItem, SubmitRequest};

/// XML namespaces used in OSEO documents
pub mod namespaces {
    /// OSEO 1.0 namespace
    pub const OSEO: &str = "http://www.opengis.net/oseo/1.0";
    /// OWS 2.0 namespace (exception reports)
    pub const OWS: &str = "http://www.opengis.net/ows/2.0";
}

/// Media type of OSEO request and response documents
pub const MEDIA_TYPE: &str = "application/xml";

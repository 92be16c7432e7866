//! OSEO error types.

use thiserror::Error;

/// Errors raised while writing or reading OSEO documents.
#[derive(Debug, Error)]
pub enum OseoError {
    /// XML could not be written or parsed.
    #[error("XML error: {0}")]
    Xml(String),

    /// The server answered with an OWS exception report.
    #[error("{code}: {text}")]
    ExceptionReport { code: String, text: String },

    /// The acknowledgement did not report success.
    #[error("Order rejected with status '{0}'")]
    Rejected(String),

    /// The acknowledgement carried no order identifier.
    #[error("Acknowledgement is missing the order identifier")]
    MissingOrderId,
}

/// Errors that can occur in the transport layer.
///
/// These are the "the request never produced an HTTP status" failures:
/// DNS, refused connections, broken streams. A 4xx/5xx response is NOT a
/// transport error — it is a perfectly good response with a bad status.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (bad URL, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Sending the request failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading the response body failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),
}

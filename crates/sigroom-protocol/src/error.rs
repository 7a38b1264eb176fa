//! Error types for the protocol layer.
//!
//! Each sigroom crate defines its own error enum. A `ProtocolError` always
//! means a frame could not be turned into a [`Message`](crate::Message);
//! it never means the socket itself is broken.

/// Errors that can occur while decoding a signaling frame.
///
/// None of these are fatal: the dispatch loop logs them and moves on to
/// the next frame.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame is not valid JSON.
    ///
    /// The inner `serde_json::Error` carries the line/column of the
    /// failure, which ends up in the log line.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// The frame is valid JSON but its `type` is not one of the known
    /// discriminators.
    #[error("unsupported message type: {0:?}")]
    UnsupportedType(String),

    /// A member the envelope cannot do without is absent.
    ///
    /// Only the envelope's `type` is required. Payload fields fall back to
    /// empty defaults instead of producing this error.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

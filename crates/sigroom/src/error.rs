//! Unified error type for the signaling client.

use std::time::Duration;

use sigroom_transport::TransportError;

/// Top-level error returned by [`SignalClient`](crate::SignalClient).
///
/// Decode failures are not here on purpose: a bad frame is logged and
/// skipped, it never ends the session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server did not complete the WebSocket handshake in time.
    #[error("connect to {url} timed out after {timeout:?}")]
    ConnectTimeout { url: String, timeout: Duration },

    /// The builder was given a configuration that can't work.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

//! `SignalClient` builder and dispatch loop.
//!
//! This is the entry point for joining a signaling room. It ties the
//! layers together: transport → protocol → handler.

use std::time::Duration;

use sigroom_protocol::{Codec, Envelope, JsonCodec, ProtocolError, UserType};
use sigroom_transport::{
    Connection, Connector, WebSocketConnection, WebSocketConnector,
};

use crate::handler::{SignalHandler, dispatch};
use crate::{ClientConfig, ClientError};

/// Builder for configuring a [`SignalClient`].
///
/// # Example
///
/// ```rust,no_run
/// use sigroom::prelude::*;
///
/// struct Quiet;
/// impl SignalHandler for Quiet {}
///
/// # async fn start() -> Result<(), ClientError> {
/// let client = SignalClientBuilder::new()
///     .url("ws://localhost:8089/ws")
///     .user_id("21345")
///     .build(Quiet)?;
/// client.run().await
/// # }
/// ```
pub struct SignalClientBuilder {
    config: ClientConfig,
}

impl SignalClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the signaling server URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Sets the id announced in the join request.
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.config.user_id = id.into();
        self
    }

    /// Sets the display name sent with the join request.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Sets the room to join. Leave empty to let the server pick.
    pub fn room_id(mut self, room_id: impl Into<String>) -> Self {
        self.config.room_id = room_id.into();
        self
    }

    /// Sets whether we join as a streamer or a browser viewer.
    pub fn user_type(mut self, user_type: UserType) -> Self {
        self.config.user_type = user_type;
        self
    }

    /// Sets the upper bound on connect plus handshake. Must be non-zero.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Builds a client that speaks JSON.
    pub fn build<H: SignalHandler>(
        self,
        handler: H,
    ) -> Result<SignalClient<H, JsonCodec>, ClientError> {
        self.build_with_codec(handler, JsonCodec)
    }

    /// Builds a client with a custom wire codec.
    pub fn build_with_codec<H: SignalHandler, C: Codec>(
        self,
        handler: H,
        codec: C,
    ) -> Result<SignalClient<H, C>, ClientError> {
        self.config.validate().map_err(ClientError::InvalidConfig)?;
        Ok(SignalClient {
            config: self.config,
            handler,
            codec,
        })
    }
}

impl Default for SignalClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A signaling client bound to one handler.
///
/// Call [`run()`](Self::run) to connect, join and process frames until the
/// server hangs up.
pub struct SignalClient<H: SignalHandler, C: Codec = JsonCodec> {
    config: ClientConfig,
    handler: H,
    codec: C,
}

impl<H: SignalHandler, C: Codec> SignalClient<H, C> {
    /// Returns the validated configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the handler frames are dispatched to.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Connects, sends the join request and runs the dispatch loop.
    ///
    /// Returns `Ok(())` when the server closes the connection. Frames that
    /// fail to decode are logged and skipped.
    ///
    /// # Errors
    /// Connect failures, connect timeout, and send/receive errors.
    pub async fn run(&self) -> Result<(), ClientError> {
        let conn = self.connect().await?;
        tracing::info!(
            conn_id = %conn.id(),
            url = %self.config.url,
            "connected to signaling server"
        );

        let join = self.codec.encode(&self.config.join_envelope());
        conn.send(&join).await?;
        tracing::info!(
            user_id = %self.config.user_id,
            room_id = %self.config.room_id,
            "join request sent"
        );

        let result = self.serve(&conn).await;
        if let Err(e) = conn.close().await {
            tracing::debug!(error = %e, "close after dispatch loop failed");
        }
        result
    }

    async fn connect(&self) -> Result<WebSocketConnection, ClientError> {
        let timeout = self.config.connect_timeout;
        match tokio::time::timeout(
            timeout,
            WebSocketConnector::new().connect(&self.config.url),
        )
        .await
        {
            Ok(conn) => Ok(conn?),
            Err(_) => Err(ClientError::ConnectTimeout {
                url: self.config.url.clone(),
                timeout,
            }),
        }
    }

    /// Receives frames one at a time until the connection closes.
    async fn serve(
        &self,
        conn: &WebSocketConnection,
    ) -> Result<(), ClientError> {
        let conn_id = conn.id();

        while !conn.is_closed() {
            let Some(frame) = conn.recv().await? else {
                tracing::info!(%conn_id, "signaling server closed the connection");
                break;
            };
            tracing::debug!(%conn_id, %frame, "received frame");

            match self.process_frame(&frame).await {
                Ok(Some(reply)) => {
                    conn.send(&self.codec.encode(&reply)).await?;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(%conn_id, error = %e, "dropping frame");
                }
            }
        }
        Ok(())
    }

    /// Decodes one frame and hands it to the handler.
    ///
    /// No I/O happens here; the returned envelope is the reply the caller
    /// should send, if any.
    ///
    /// # Errors
    /// Whatever [`Codec::decode`] rejects. The frame is not dispatched.
    pub async fn process_frame(
        &self,
        raw: &str,
    ) -> Result<Option<Envelope>, ProtocolError> {
        let message = self.codec.decode(raw)?;
        Ok(dispatch(&self.handler, message).await)
    }
}

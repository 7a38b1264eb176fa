//! Client configuration.

use std::time::Duration;

use sigroom_protocol::{Envelope, JoinRoomPayload, Message, UserType};

/// Signaling endpoint used when none is configured.
pub const DEFAULT_URL: &str = "ws://localhost:8089/ws";

/// User id announced in the join request when none is configured.
pub const DEFAULT_USER_ID: &str = "21345";

/// Everything the client needs to join a room.
///
/// Build one through [`SignalClientBuilder`](crate::SignalClientBuilder)
/// or start from `ClientConfig::default()` and override fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `ws://` URL of the signaling server. TLS is not compiled in, so
    /// `wss://` is rejected by the builder.
    pub url: String,

    /// Our id in the room; peers address offers to it.
    pub user_id: String,

    /// Display name. Left out of the join request when empty.
    pub name: String,

    /// Room to join. Left out of the join request when empty, in which
    /// case the server picks.
    pub room_id: String,

    /// What we announce ourselves as.
    pub user_type: UserType,

    /// Upper bound on TCP connect plus WebSocket handshake.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            name: String::new(),
            room_id: String::new(),
            user_type: UserType::Streamer,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// The `joinRoom` envelope sent right after connecting.
    pub fn join_envelope(&self) -> Envelope {
        Message::JoinRoom(JoinRoomPayload {
            name: self.name.clone(),
            id: self.user_id.clone(),
            user_type: self.user_type,
            room_id: self.room_id.clone(),
        })
        .to_envelope()
    }

    /// Checks the things that would only fail later at connect time.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.url.starts_with("wss://") {
            return Err(format!(
                "wss:// needs TLS, which this build lacks: {:?}",
                self.url
            ));
        }
        if !self.url.starts_with("ws://") {
            return Err(format!("url must be ws://, got {:?}", self.url));
        }
        if self.connect_timeout.is_zero() {
            return Err("connect_timeout must be non-zero".into());
        }
        Ok(())
    }
}

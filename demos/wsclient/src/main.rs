//! Joins a signaling room as a streamer and logs the traffic.
//!
//! ```text
//! wsclient [URL] [USER_ID]
//! ```
//!
//! Defaults to `ws://localhost:8089/ws` and id `21345`. Set `RUST_LOG`
//! to tune output; `RUST_LOG=sigroom=debug` prints every received frame.

use sigroom::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Logs every message and answers offers by echoing the offer's own
/// description back. There is no media stack behind this client, so the
/// answer only exercises the round trip through the server.
struct LoopbackHandler;

impl SignalHandler for LoopbackHandler {
    async fn on_join_room(&self, join: &JoinRoomPayload) {
        tracing::info!(
            id = %join.id,
            name = %join.name,
            room_id = %join.room_id,
            user_type = ?join.user_type,
            "peer joined"
        );
    }

    async fn on_offer(
        &self,
        offer: &SessionPayload,
    ) -> Option<SessionDescription> {
        tracing::info!(
            from = %offer.from,
            session_id = %offer.session_id,
            "offer received"
        );
        offer.description.clone()
    }

    async fn on_answer(&self, answer: &SessionPayload) {
        tracing::info!(from = %answer.from, session_id = %answer.session_id, "answer received");
    }

    async fn on_candidate(&self, candidate: &SessionPayload) {
        if let Some(c) = &candidate.candidate {
            tracing::info!(
                from = %candidate.from,
                sdp_mid = %c.sdp_mid,
                sdp_m_line_index = %c.sdp_m_line_index,
                candidate = %c.candidate,
                "candidate received"
            );
        }
    }

    async fn on_hang_up(&self) {
        tracing::info!("peer hung up");
    }

    async fn on_leave_room(&self) {
        tracing::info!("peer left the room");
    }

    async fn on_update_user_list(&self) {
        tracing::info!("user list updated");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sigroom=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| DEFAULT_URL.to_string());
    let user_id = args.next().unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    let client = SignalClientBuilder::new()
        .url(url)
        .user_id(user_id)
        .user_type(UserType::Streamer)
        .build(LoopbackHandler)?;

    client.run().await?;
    tracing::info!("signaling session ended");
    Ok(())
}

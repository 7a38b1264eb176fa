//! Application hooks for incoming signaling messages.
//!
//! The client decodes frames; what to *do* with an offer or a candidate
//! is up to the application (hand it to a peer connection, log it, ...).
//! Implement [`SignalHandler`] for that. Every method has a no-op
//! default, so a handler only overrides what it cares about.

use sigroom_protocol::{
    Envelope, JoinRoomPayload, Message, SessionDescription, SessionPayload,
    build_answer,
};

/// Reacts to decoded signaling messages.
///
/// # Example
///
/// ```rust
/// use sigroom::prelude::*;
///
/// /// Answers every offer with a canned SDP.
/// struct CannedAnswer(String);
///
/// impl SignalHandler for CannedAnswer {
///     async fn on_offer(
///         &self,
///         _offer: &SessionPayload,
///     ) -> Option<SessionDescription> {
///         Some(SessionDescription::new("answer", self.0.clone()))
///     }
/// }
/// ```
pub trait SignalHandler: Send + Sync + 'static {
    /// A peer announced itself in the room.
    async fn on_join_room(&self, _join: &JoinRoomPayload) {}

    /// A peer wants to open a session with us.
    ///
    /// Return our local description to have an `answer` sent back, or
    /// `None` to leave the offer unanswered.
    async fn on_offer(
        &self,
        _offer: &SessionPayload,
    ) -> Option<SessionDescription> {
        None
    }

    /// The remote side answered one of our offers.
    async fn on_answer(&self, _answer: &SessionPayload) {}

    /// A remote ICE candidate for an existing session.
    async fn on_candidate(&self, _candidate: &SessionPayload) {}

    async fn on_hang_up(&self) {}

    async fn on_leave_room(&self) {}

    async fn on_update_user_list(&self) {}
}

/// Routes one decoded message to `handler`.
///
/// Returns the reply to send, if any. Only offers produce one.
pub async fn dispatch<H: SignalHandler>(
    handler: &H,
    message: Message,
) -> Option<Envelope> {
    match message {
        Message::JoinRoom(join) => handler.on_join_room(&join).await,
        Message::Offer(offer) => {
            let description = handler.on_offer(&offer).await?;
            tracing::debug!(
                session_id = %offer.session_id,
                to = %offer.from,
                "answering offer"
            );
            return Some(build_answer(&offer, description));
        }
        Message::Answer(answer) => handler.on_answer(&answer).await,
        Message::Candidate(candidate) => {
            handler.on_candidate(&candidate).await
        }
        Message::HangUp => handler.on_hang_up().await,
        Message::LeaveRoom => handler.on_leave_room().await,
        Message::UpdateUserList => handler.on_update_user_list().await,
    }
    None
}

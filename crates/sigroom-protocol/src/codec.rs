//! Encoding and decoding of signaling frames.
//!
//! The free functions are the whole codec: [`encode_join_room`] builds
//! the request a streamer sends after connecting, [`decode`] turns any
//! incoming frame into a typed [`Message`], and [`build_answer`] produces
//! the reply to an offer. The [`Codec`] trait wraps them so the client
//! can be written against a format rather than against JSON directly.

use serde_json::Value;

use crate::lenient;
use crate::{
    Envelope, JoinRoomPayload, Message, MessageType, ProtocolError,
    SessionDescription, SessionPayload,
};

/// Converts between envelopes and text frames.
///
/// `Send + Sync + 'static` so one codec can live inside a long-running
/// client task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes an outgoing envelope. Never fails.
    fn encode(&self, envelope: &Envelope) -> String;

    /// Parses one incoming frame.
    ///
    /// # Errors
    /// See [`decode`].
    fn decode(&self, raw: &str) -> Result<Message, ProtocolError>;
}

/// The JSON [`Codec`]: compact JSON, one object per frame.
///
/// ```rust
/// use sigroom_protocol::{Codec, JsonCodec, Message};
///
/// let codec = JsonCodec;
/// let text = codec.encode(&Message::HangUp.to_envelope());
/// assert_eq!(codec.decode(&text).unwrap(), Message::HangUp);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, envelope: &Envelope) -> String {
        envelope.to_json()
    }

    fn decode(&self, raw: &str) -> Result<Message, ProtocolError> {
        decode(raw)
    }
}

/// Builds the bare streamer join: `{"type":"joinRoom","data":{"id":<id>,"userType":1}}`.
pub fn encode_join_room(id: &str) -> String {
    Message::JoinRoom(JoinRoomPayload::streamer(id))
        .to_envelope()
        .to_json()
}

/// Decodes one frame into a typed message.
///
/// Payload members are read permissively: absent or wrong-typed fields
/// become empty defaults instead of errors. Only the envelope itself can
/// be rejected.
///
/// # Errors
/// - [`ProtocolError::MalformedJson`] if `raw` is not JSON.
/// - [`ProtocolError::MissingField`] if there is no `type` member
///   (including when the top level is not an object).
/// - [`ProtocolError::UnsupportedType`] if `type` is not a known
///   discriminator.
pub fn decode(raw: &str) -> Result<Message, ProtocolError> {
    let root: Value =
        serde_json::from_str(raw).map_err(ProtocolError::MalformedJson)?;

    let Value::Object(mut root) = root else {
        return Err(ProtocolError::MissingField("type"));
    };

    let tag = root
        .remove("type")
        .ok_or(ProtocolError::MissingField("type"))?;
    let kind: MessageType = lenient::coerce_string(tag).parse()?;
    let data = root.remove("data").unwrap_or(Value::Null);

    let message = Message::from_parts(kind, data);
    tracing::trace!(%kind, "decoded signaling frame");
    Ok(message)
}

/// The answer envelope for `offer`: peers swapped, session and room kept,
/// `description` attached verbatim.
pub fn build_answer(
    offer: &SessionPayload,
    description: SessionDescription,
) -> Envelope {
    Message::Answer(offer.reply(description)).to_envelope()
}

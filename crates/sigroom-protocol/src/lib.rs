//! Signaling wire protocol for sigroom.
//!
//! This crate defines the messages WebRTC peers exchange through a
//! signaling room, and how they look on the wire:
//!
//! - **Types** ([`Envelope`], [`Message`], [`MessageType`], payloads):
//!   the `{type, data}` envelope and the records `data` can hold.
//! - **Codec** ([`decode`], [`encode_join_room`], [`build_answer`],
//!   [`Codec`] / [`JsonCodec`]): text frame ⇄ typed message.
//! - **Errors** ([`ProtocolError`]): why a frame was rejected.
//!
//! # Architecture
//!
//! The protocol layer is pure. It never opens a socket and keeps no state
//! between frames, so it can be called from any number of tasks at once.
//!
//! ```text
//! Transport (text frames) → Protocol (Message) → Client (handler)
//! ```

mod codec;
mod error;
mod lenient;
mod types;

pub use codec::{Codec, JsonCodec, build_answer, decode, encode_join_room};
pub use error::ProtocolError;
pub use types::{
    Envelope, IceCandidate, JoinRoomPayload, Message, MessageType,
    SessionDescription, SessionPayload, UserType,
};

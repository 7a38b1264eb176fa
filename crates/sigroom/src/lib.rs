//! # sigroom
//!
//! WebSocket signaling client for WebRTC rooms.
//!
//! A client connects to a signaling server, announces itself with a
//! `joinRoom` request, then decodes every incoming frame and hands it to
//! your [`SignalHandler`]. Offers the handler chooses to accept are
//! answered automatically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sigroom::prelude::*;
//!
//! struct Logger;
//!
//! impl SignalHandler for Logger {
//!     async fn on_candidate(&self, c: &SessionPayload) {
//!         println!("candidate from {}", c.from);
//!     }
//! }
//!
//! # async fn start() -> Result<(), ClientError> {
//! SignalClientBuilder::new()
//!     .url("ws://localhost:8089/ws")
//!     .build(Logger)?
//!     .run()
//!     .await
//! # }
//! ```

#![allow(async_fn_in_trait)]

mod client;
mod config;
mod error;
mod handler;

pub use client::{SignalClient, SignalClientBuilder};
pub use config::{ClientConfig, DEFAULT_URL, DEFAULT_USER_ID};
pub use error::ClientError;
pub use handler::{SignalHandler, dispatch};

pub mod prelude {
    pub use crate::{
        ClientConfig, ClientError, DEFAULT_URL, DEFAULT_USER_ID,
        SignalClient, SignalClientBuilder, SignalHandler,
    };
    pub use sigroom_protocol::{
        Envelope, IceCandidate, JoinRoomPayload, Message, MessageType,
        ProtocolError, SessionDescription, SessionPayload, UserType,
    };
}

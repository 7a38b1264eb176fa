//! Signaling types that travel on the wire.
//!
//! Every frame is a JSON object of the shape
//!
//! ```text
//! { "type": "<discriminator>", "data": { ... } }
//! ```
//!
//! where the discriminator selects which payload record `data` holds.
//! The field names here are fixed by the peers we talk to (browsers and
//! the signaling server), so every serde rename below matters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ProtocolError;
use crate::lenient;

// ---------------------------------------------------------------------------
// MessageType: the discriminator
// ---------------------------------------------------------------------------

/// The `type` tag of an envelope.
///
/// Encoder and decoder share this one enum, so a discriminator can't be
/// spelled two different ways. `#[serde(rename_all = "camelCase")]` gives
/// the exact literals used on the wire: `"joinRoom"`, `"hangUp"`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    JoinRoom,
    Offer,
    Answer,
    Candidate,
    HangUp,
    LeaveRoom,
    UpdateUserList,
}

impl MessageType {
    /// Every discriminator, in protocol order.
    pub const ALL: [MessageType; 7] = [
        Self::JoinRoom,
        Self::Offer,
        Self::Answer,
        Self::Candidate,
        Self::HangUp,
        Self::LeaveRoom,
        Self::UpdateUserList,
    ];

    /// The wire literal for this discriminator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JoinRoom => "joinRoom",
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::Candidate => "candidate",
            Self::HangUp => "hangUp",
            Self::LeaveRoom => "leaveRoom",
            Self::UpdateUserList => "updateUserList",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ProtocolError;

    /// Matching is exact: `"Offer"` or `"offer "` are unsupported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProtocolError::UnsupportedType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// UserType
// ---------------------------------------------------------------------------

/// What kind of participant is joining a room.
///
/// Sent as a plain integer: `0` for a browser, `1` for a streamer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserType {
    /// A browser viewer. Also the fallback for missing or unknown codes.
    #[default]
    Web,
    /// A media source that answers offers.
    Streamer,
}

impl UserType {
    /// The integer sent on the wire.
    pub fn code(self) -> i64 {
        match self {
            Self::Web => 0,
            Self::Streamer => 1,
        }
    }
}

impl From<i64> for UserType {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Streamer,
            _ => Self::Web,
        }
    }
}

impl Serialize for UserType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

/// An SDP offer or answer, as produced by `RTCPeerConnection`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDescription {
    /// `"offer"`, `"answer"`, `"pranswer"` or `"rollback"`. Not validated.
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    /// The SDP body, passed through untouched.
    #[serde(deserialize_with = "lenient::string")]
    pub sdp: String,
}

impl SessionDescription {
    /// Creates a description of the given `type` carrying `sdp`.
    pub fn new(kind: impl Into<String>, sdp: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            sdp: sdp.into(),
        }
    }
}

/// One ICE candidate line plus the media section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IceCandidate {
    #[serde(rename = "sdpMid", deserialize_with = "lenient::string")]
    pub sdp_mid: String,
    /// Kept as text; numeric values are rendered (`0` → `"0"`).
    #[serde(rename = "sdpMLineIndex", deserialize_with = "lenient::string")]
    pub sdp_m_line_index: String,
    #[serde(deserialize_with = "lenient::string")]
    pub candidate: String,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload of `joinRoom`.
///
/// Absent members decode to `""` / [`UserType::Web`]. Empty `name` and
/// `roomId` are left out when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinRoomPayload {
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::code")]
    pub user_type: UserType,
    #[serde(
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub room_id: String,
}

impl JoinRoomPayload {
    /// A bare streamer join: just an id, no name or room.
    pub fn streamer(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_type: UserType::Streamer,
            ..Self::default()
        }
    }
}

/// Payload shared by `offer`, `answer` and `candidate`.
///
/// The session lives entirely in these fields: `from`/`to` name the two
/// peers, `sessionId` ties an offer to its answer and candidates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionPayload {
    #[serde(deserialize_with = "lenient::string")]
    pub from: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to: String,
    #[serde(deserialize_with = "lenient::string")]
    pub session_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub room_id: String,
    /// Set on offers and answers.
    #[serde(
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<SessionDescription>,
    /// Set on candidates.
    #[serde(
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub candidate: Option<IceCandidate>,
}

impl SessionPayload {
    /// The payload of a reply to this one: `from` and `to` swapped, the
    /// session and room carried over, `description` attached as given.
    pub fn reply(&self, description: SessionDescription) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            session_id: self.session_id.clone(),
            room_id: self.room_id.clone(),
            description: Some(description),
            candidate: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Message: the decoded, typed form of an envelope
// ---------------------------------------------------------------------------

/// A decoded signaling message.
///
/// This is a closed sum type: one variant per discriminator. `hangUp`,
/// `leaveRoom` and `updateUserList` carry nothing beyond their tag; their
/// `data` is accepted but not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    JoinRoom(JoinRoomPayload),
    Offer(SessionPayload),
    Answer(SessionPayload),
    Candidate(SessionPayload),
    HangUp,
    LeaveRoom,
    UpdateUserList,
}

impl Message {
    /// The discriminator this message is sent under.
    pub fn kind(&self) -> MessageType {
        match self {
            Self::JoinRoom(_) => MessageType::JoinRoom,
            Self::Offer(_) => MessageType::Offer,
            Self::Answer(_) => MessageType::Answer,
            Self::Candidate(_) => MessageType::Candidate,
            Self::HangUp => MessageType::HangUp,
            Self::LeaveRoom => MessageType::LeaveRoom,
            Self::UpdateUserList => MessageType::UpdateUserList,
        }
    }

    /// Builds the typed message for `kind` out of an envelope's `data`.
    ///
    /// A `data` that is not an object is read as `{}`, so every field
    /// takes its default. Payload fields never reject a value, so this
    /// cannot fail; only the envelope itself is validated by
    /// [`decode`](crate::decode).
    pub fn from_parts(kind: MessageType, data: Value) -> Self {
        match kind {
            MessageType::JoinRoom => Self::JoinRoom(payload(data)),
            MessageType::Offer => Self::Offer(payload(data)),
            MessageType::Answer => Self::Answer(payload(data)),
            MessageType::Candidate => Self::Candidate(payload(data)),
            MessageType::HangUp => Self::HangUp,
            MessageType::LeaveRoom => Self::LeaveRoom,
            MessageType::UpdateUserList => Self::UpdateUserList,
        }
    }

    /// Wraps this message in its wire envelope.
    pub fn to_envelope(&self) -> Envelope {
        let data = match self {
            Self::JoinRoom(p) => to_data(p),
            Self::Offer(p) | Self::Answer(p) | Self::Candidate(p) => {
                to_data(p)
            }
            Self::HangUp | Self::LeaveRoom | Self::UpdateUserList => {
                Value::Object(Map::new())
            }
        };
        Envelope {
            kind: self.kind(),
            data,
        }
    }
}

/// Reads a payload record out of `data`, defaulting on anything that is
/// not an object.
fn payload<T: serde::de::DeserializeOwned + Default>(data: Value) -> T {
    match data {
        // Every field goes through a `lenient` helper, so an object
        // always converts.
        Value::Object(_) => serde_json::from_value(data).unwrap_or_default(),
        _ => T::default(),
    }
}

/// Serializes a payload record into `data`.
fn to_data<T: Serialize>(payload: &T) -> Value {
    // String-keyed records of strings and integers always convert.
    serde_json::to_value(payload).unwrap_or_else(|_| Value::Object(Map::new()))
}

// ---------------------------------------------------------------------------
// Envelope: the top-level wire format
// ---------------------------------------------------------------------------

/// The outer `{type, data}` object of every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub data: Value,
}

impl Envelope {
    /// Compact JSON text, ready for a text frame.
    pub fn to_json(&self) -> String {
        // A unit-variant tag and a `Value` tree always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decodes `data` according to `type`.
    pub fn into_message(self) -> Message {
        Message::from_parts(self.kind, self.data)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire names below are what browsers and the signaling server
    //! expect; a rename slip here breaks interop silently.

    use super::*;
    use serde_json::json;

    // =====================================================================
    // MessageType
    // =====================================================================

    #[test]
    fn test_message_type_wire_literals() {
        let literals: Vec<_> =
            MessageType::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            literals,
            [
                "joinRoom",
                "offer",
                "answer",
                "candidate",
                "hangUp",
                "leaveRoom",
                "updateUserList",
            ]
        );
    }

    #[test]
    fn test_message_type_serde_matches_as_str() {
        for kind in MessageType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn test_message_type_parse_is_exact() {
        assert_eq!("hangUp".parse::<MessageType>().unwrap(), MessageType::HangUp);
        assert!(matches!(
            "HangUp".parse::<MessageType>(),
            Err(ProtocolError::UnsupportedType(t)) if t == "HangUp"
        ));
        assert!("".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_message_type_display() {
        assert_eq!(MessageType::UpdateUserList.to_string(), "updateUserList");
    }

    // =====================================================================
    // UserType
    // =====================================================================

    #[test]
    fn test_user_type_codes() {
        assert_eq!(UserType::Web.code(), 0);
        assert_eq!(UserType::Streamer.code(), 1);
        assert_eq!(UserType::from(1), UserType::Streamer);
        assert_eq!(UserType::from(0), UserType::Web);
        assert_eq!(UserType::from(42), UserType::Web);
    }

    // =====================================================================
    // Payload decoding
    // =====================================================================

    #[test]
    fn test_join_room_payload_reads_all_fields() {
        let p: JoinRoomPayload = serde_json::from_value(json!({
            "name": "cam-1",
            "id": "21345",
            "userType": 1,
            "roomId": "lobby",
        }))
        .unwrap();
        assert_eq!(p.name, "cam-1");
        assert_eq!(p.id, "21345");
        assert_eq!(p.user_type, UserType::Streamer);
        assert_eq!(p.room_id, "lobby");
    }

    #[test]
    fn test_join_room_payload_defaults_missing_fields() {
        let p: JoinRoomPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p, JoinRoomPayload::default());
    }

    #[test]
    fn test_join_room_payload_coerces_wrong_types() {
        let p: JoinRoomPayload = serde_json::from_value(json!({
            "id": 21345,
            "userType": "1",
            "name": null,
        }))
        .unwrap();
        assert_eq!(p.id, "21345");
        assert_eq!(p.user_type, UserType::Streamer);
        assert_eq!(p.name, "");
    }

    #[test]
    fn test_session_payload_nested_description() {
        let p: SessionPayload = serde_json::from_value(json!({
            "from": "A",
            "to": "B",
            "sessionId": "s1",
            "roomId": "r1",
            "description": { "type": "offer", "sdp": "v=0" },
        }))
        .unwrap();
        assert_eq!(p.description, Some(SessionDescription::new("offer", "v=0")));
        assert_eq!(p.candidate, None);
    }

    #[test]
    fn test_session_payload_non_object_description_is_none() {
        let p: SessionPayload = serde_json::from_value(json!({
            "description": "v=0",
            "candidate": null,
        }))
        .unwrap();
        assert_eq!(p.description, None);
        assert_eq!(p.candidate, None);
    }

    #[test]
    fn test_ice_candidate_numeric_mline_index_becomes_text() {
        let c: IceCandidate = serde_json::from_value(json!({
            "sdpMid": "0",
            "sdpMLineIndex": 0,
            "candidate": "candidate:1 1 UDP 2122252543 10.0.0.2 50000 typ host",
        }))
        .unwrap();
        assert_eq!(c.sdp_m_line_index, "0");
    }

    // =====================================================================
    // Reply and envelope construction
    // =====================================================================

    #[test]
    fn test_reply_swaps_peers_and_drops_candidate() {
        let offer = SessionPayload {
            from: "A".into(),
            to: "B".into(),
            session_id: "s1".into(),
            room_id: "r1".into(),
            description: Some(SessionDescription::new("offer", "v=0 o")),
            candidate: Some(IceCandidate::default()),
        };
        let reply = offer.reply(SessionDescription::new("answer", "v=0 a"));
        assert_eq!(reply.from, "B");
        assert_eq!(reply.to, "A");
        assert_eq!(reply.session_id, "s1");
        assert_eq!(reply.room_id, "r1");
        assert_eq!(
            reply.description,
            Some(SessionDescription::new("answer", "v=0 a"))
        );
        assert_eq!(reply.candidate, None);
    }

    #[test]
    fn test_join_room_envelope_omits_empty_name_and_room() {
        let env = Message::JoinRoom(JoinRoomPayload::streamer("7")).to_envelope();
        assert_eq!(env.kind, MessageType::JoinRoom);
        assert_eq!(env.data, json!({ "id": "7", "userType": 1 }));
    }

    #[test]
    fn test_unit_messages_envelope_with_empty_data() {
        for msg in [Message::HangUp, Message::LeaveRoom, Message::UpdateUserList] {
            let env = msg.to_envelope();
            assert_eq!(env.kind, msg.kind());
            assert_eq!(env.data, json!({}));
        }
    }

    #[test]
    fn test_envelope_to_json_shape() {
        let env = Message::LeaveRoom.to_envelope();
        let parsed: Value = serde_json::from_str(&env.to_json()).unwrap();
        assert_eq!(parsed, json!({ "type": "leaveRoom", "data": {} }));
        assert_eq!(env.to_string(), env.to_json());
    }

    #[test]
    fn test_envelope_into_message_with_non_object_data() {
        let env = Envelope {
            kind: MessageType::Offer,
            data: json!([1, 2, 3]),
        };
        assert_eq!(
            env.into_message(),
            Message::Offer(SessionPayload::default())
        );
    }

    #[test]
    fn test_user_type_serializes_as_code() {
        assert_eq!(serde_json::to_value(UserType::Streamer).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(UserType::Web).unwrap(), json!(0));
    }

    #[test]
    fn test_session_payload_envelope_skips_absent_records() {
        let offer = SessionPayload {
            from: "A".into(),
            to: "B".into(),
            ..SessionPayload::default()
        };
        let env = Message::Offer(offer).to_envelope();
        assert_eq!(
            env.data,
            json!({ "from": "A", "to": "B", "sessionId": "", "roomId": "" })
        );
    }

    #[test]
    fn test_candidate_envelope_uses_wire_names() {
        let msg = Message::Candidate(SessionPayload {
            candidate: Some(IceCandidate {
                sdp_mid: "0".into(),
                sdp_m_line_index: "0".into(),
                candidate: "candidate:1".into(),
            }),
            ..SessionPayload::default()
        });
        let env = msg.to_envelope();
        assert_eq!(
            env.data["candidate"],
            json!({ "sdpMid": "0", "sdpMLineIndex": "0", "candidate": "candidate:1" })
        );
        assert!(env.data.get("description").is_none());
    }

    #[test]
    fn test_envelope_to_json_matches_derived_serialize() {
        let env = Message::JoinRoom(JoinRoomPayload::streamer("9")).to_envelope();
        assert_eq!(
            env.to_json(),
            r#"{"type":"joinRoom","data":{"id":"9","userType":1}}"#
        );
        assert_eq!(env.into_message(), Message::JoinRoom(JoinRoomPayload::streamer("9")));
    }
}

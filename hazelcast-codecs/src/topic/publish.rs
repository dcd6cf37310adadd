//! Publishes a message to a topic.

use hazelcast_protocol::codec::{data, string};
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x040100;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x040101;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = false;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Topic.Publish";

const REQUEST: FixedLayout<0> = FixedLayout::request([]);
const RESPONSE: FixedLayout<0> = FixedLayout::response([]);

/// Parameters of a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Topic name.
    pub name: String,
    /// Serialized message.
    pub message: Data,
}

/// Encodes a publish request.
pub fn encode_request(name: &str, payload: &Data) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size()));
    string::encode(&mut message, name);
    data::encode(&mut message, payload);
    message
}

/// Decodes a publish request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, _) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
        message: data::decode(&mut iterator)?,
    })
}

/// Encodes the empty publish acknowledgement.
pub fn encode_response() -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size()));
    message
}

/// Checks a publish acknowledgement.
pub fn decode_response(message: &ClientMessage) -> Result<()> {
    util::open(message, RESPONSE_MESSAGE_TYPE).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let payload = Data::from(vec![0xCA, 0xFE]);
        let params = decode_request(&encode_request("news", &payload)).unwrap();
        assert_eq!(params.name, "news");
        assert_eq!(params.message, payload);
        decode_response(&encode_response()).unwrap();
    }
}

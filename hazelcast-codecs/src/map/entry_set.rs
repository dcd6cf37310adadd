//! Fetches every entry of a map.

use hazelcast_protocol::codec::{data, entry_list, string};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::{ClientMessage, Data, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x012500;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x012501;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Map.EntrySet";

/// Parameters of an entry set query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Map name.
    pub name: String,
}

/// Result of an entry set query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParameters {
    /// Serialized entries.
    pub response: Vec<(Data, Data)>,
}

/// Encodes an entry set request.
pub fn encode_request(name: &str) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    message.add(util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST_INITIAL_FRAME_SIZE));
    string::encode(&mut message, name);
    message
}

/// Decodes an entry set request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, _) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    Ok(RequestParameters {
        name: string::decode(&mut iterator)?,
    })
}

/// Encodes an entry set response.
pub fn encode_response(response: &[(Data, Data)]) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.add(util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE_INITIAL_FRAME_SIZE));
    entry_list::encode(&mut message, response, data::encode, data::encode);
    message
}

/// Decodes an entry set response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (mut iterator, _) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    Ok(ResponseParameters {
        response: entry_list::decode(&mut iterator, data::decode, data::decode)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_precede_values() {
        let entries = vec![
            (Data::from(vec![1]), Data::from(vec![10])),
            (Data::from(vec![2]), Data::from(vec![20])),
        ];
        let message = encode_response(&entries);
        let contents: Vec<&[u8]> = message.frames()[1..]
            .iter()
            .map(|f| &f.content[..])
            .collect();
        let expected: Vec<&[u8]> = vec![&[], &[1], &[2], &[], &[], &[10], &[20], &[]];
        assert_eq!(contents, expected);
        assert_eq!(decode_response(&message).unwrap().response, entries);
    }

    #[test]
    fn test_empty_map() {
        let message = encode_response(&[]);
        assert_eq!(message.frame_count(), 5);
        assert!(decode_response(&message).unwrap().response.is_empty());
    }

    #[test]
    fn test_request_round_trip() {
        assert_eq!(decode_request(&encode_request("m")).unwrap().name, "m");
    }
}

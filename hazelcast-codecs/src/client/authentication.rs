//! Client authentication with cluster name and optional credentials.

use uuid::Uuid;

use hazelcast_protocol::codec::custom::Address;
use hazelcast_protocol::codec::fixed_size::{
    decode_bool, decode_byte, decode_int, decode_uuid, encode_bool, encode_byte, encode_int,
    encode_uuid,
};
use hazelcast_protocol::codec::{list, nullable, string, CustomCodec};
use hazelcast_protocol::protocol::constants::*;
use hazelcast_protocol::protocol::FixedLayout;
use hazelcast_protocol::{ClientMessage, ProtocolError, Result};

use crate::util;

/// Request message type.
pub const REQUEST_MESSAGE_TYPE: i32 = 0x000100;
/// Response message type.
pub const RESPONSE_MESSAGE_TYPE: i32 = 0x000101;
/// Whether the request may be resent after a connection failure.
pub const RETRYABLE: bool = true;
/// Diagnostic operation name.
pub const OPERATION_NAME: &str = "Client.Authentication";

const REQUEST: FixedLayout<2> = FixedLayout::request([UUID_SIZE_IN_BYTES, BYTE_SIZE_IN_BYTES]);
const REQUEST_UUID_OFFSET: usize = REQUEST.offset(0);
const REQUEST_SERIALIZATION_VERSION_OFFSET: usize = REQUEST.offset(1);

const RESPONSE: FixedLayout<6> = FixedLayout::response([
    BYTE_SIZE_IN_BYTES,
    UUID_SIZE_IN_BYTES,
    BYTE_SIZE_IN_BYTES,
    INT_SIZE_IN_BYTES,
    UUID_SIZE_IN_BYTES,
    BOOLEAN_SIZE_IN_BYTES,
]);
const RESPONSE_STATUS_OFFSET: usize = RESPONSE.offset(0);
const RESPONSE_MEMBER_UUID_OFFSET: usize = RESPONSE.offset(1);
const RESPONSE_SERIALIZATION_VERSION_OFFSET: usize = RESPONSE.offset(2);
const RESPONSE_PARTITION_COUNT_OFFSET: usize = RESPONSE.offset(3);
const RESPONSE_CLUSTER_ID_OFFSET: usize = RESPONSE.offset(4);
const RESPONSE_FAILOVER_SUPPORTED_OFFSET: usize = RESPONSE.offset(5);

/// Parameters of an authentication request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// Name of the cluster the client expects to join.
    pub cluster_name: String,
    /// User name, absent for unsecured clusters.
    pub username: Option<String>,
    /// Password, absent for unsecured clusters.
    pub password: Option<String>,
    /// Client UUID, absent on first connection.
    pub uuid: Option<Uuid>,
    /// Client type, e.g. `RST`.
    pub client_type: String,
    /// Serialization version the client speaks.
    pub serialization_version: u8,
    /// Client library version.
    pub client_hazelcast_version: String,
    /// Client instance name.
    pub client_name: String,
    /// User-defined client labels.
    pub labels: Vec<String>,
}

/// Authentication outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParameters {
    /// 0 authenticated, 1 credentials failed, 2 serialization version
    /// mismatch, 3 not allowed in cluster.
    pub status: u8,
    /// Address of the member that answered.
    pub address: Option<Address>,
    /// UUID of the member that answered.
    pub member_uuid: Option<Uuid>,
    /// Serialization version of the member.
    pub serialization_version: u8,
    /// Member codebase version.
    pub server_hazelcast_version: String,
    /// Number of partitions in the cluster.
    pub partition_count: i32,
    /// Cluster identity.
    pub cluster_id: Uuid,
    /// Whether the cluster supports client failover.
    pub failover_supported: bool,
}

/// Encodes an authentication request.
pub fn encode_request(params: &RequestParameters) -> ClientMessage {
    let mut message = util::request_message(OPERATION_NAME, RETRYABLE);
    let mut initial = util::request_frame(REQUEST_MESSAGE_TYPE, REQUEST.frame_size());
    encode_uuid(&mut initial.content, REQUEST_UUID_OFFSET, params.uuid);
    encode_byte(
        &mut initial.content,
        REQUEST_SERIALIZATION_VERSION_OFFSET,
        params.serialization_version,
    );
    message.add(initial);

    string::encode(&mut message, &params.cluster_name);
    nullable::encode_nullable(&mut message, params.username.as_deref(), string::encode);
    nullable::encode_nullable(&mut message, params.password.as_deref(), string::encode);
    string::encode(&mut message, &params.client_type);
    string::encode(&mut message, &params.client_hazelcast_version);
    string::encode(&mut message, &params.client_name);
    list::encode(&mut message, &params.labels, |m, s| string::encode(m, s));
    message
}

/// Decodes an authentication request.
pub fn decode_request(message: &ClientMessage) -> Result<RequestParameters> {
    let (mut iterator, initial) = util::open(message, REQUEST_MESSAGE_TYPE)?;
    let uuid = decode_uuid(&initial.content, REQUEST_UUID_OFFSET)?;
    let serialization_version =
        decode_byte(&initial.content, REQUEST_SERIALIZATION_VERSION_OFFSET)?;

    Ok(RequestParameters {
        cluster_name: string::decode(&mut iterator)?,
        username: nullable::decode_nullable(&mut iterator, string::decode)?,
        password: nullable::decode_nullable(&mut iterator, string::decode)?,
        uuid,
        client_type: string::decode(&mut iterator)?,
        serialization_version,
        client_hazelcast_version: string::decode(&mut iterator)?,
        client_name: string::decode(&mut iterator)?,
        labels: list::decode(&mut iterator, string::decode)?,
    })
}

/// Encodes an authentication response.
pub fn encode_response(params: &ResponseParameters) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = util::response_frame(RESPONSE_MESSAGE_TYPE, RESPONSE.frame_size());
    encode_byte(&mut initial.content, RESPONSE_STATUS_OFFSET, params.status);
    encode_uuid(&mut initial.content, RESPONSE_MEMBER_UUID_OFFSET, params.member_uuid);
    encode_byte(
        &mut initial.content,
        RESPONSE_SERIALIZATION_VERSION_OFFSET,
        params.serialization_version,
    );
    encode_int(
        &mut initial.content,
        RESPONSE_PARTITION_COUNT_OFFSET,
        params.partition_count,
    );
    encode_uuid(&mut initial.content, RESPONSE_CLUSTER_ID_OFFSET, Some(params.cluster_id));
    encode_bool(
        &mut initial.content,
        RESPONSE_FAILOVER_SUPPORTED_OFFSET,
        params.failover_supported,
    );
    message.add(initial);

    Address::encode_nullable(&mut message, params.address.as_ref());
    string::encode(&mut message, &params.server_hazelcast_version);
    message
}

/// Decodes an authentication response.
pub fn decode_response(message: &ClientMessage) -> Result<ResponseParameters> {
    let (mut iterator, initial) = util::open(message, RESPONSE_MESSAGE_TYPE)?;
    let content = &initial.content;

    Ok(ResponseParameters {
        status: decode_byte(content, RESPONSE_STATUS_OFFSET)?,
        member_uuid: decode_uuid(content, RESPONSE_MEMBER_UUID_OFFSET)?,
        serialization_version: decode_byte(content, RESPONSE_SERIALIZATION_VERSION_OFFSET)?,
        partition_count: decode_int(content, RESPONSE_PARTITION_COUNT_OFFSET)?,
        cluster_id: decode_uuid(content, RESPONSE_CLUSTER_ID_OFFSET)?
            .ok_or(ProtocolError::UnexpectedNull("cluster id"))?,
        failover_supported: decode_bool(content, RESPONSE_FAILOVER_SUPPORTED_OFFSET)?,
        address: Address::decode_nullable(&mut iterator)?,
        server_hazelcast_version: string::decode(&mut iterator)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RequestParameters {
        RequestParameters {
            cluster_name: "dev".to_string(),
            username: None,
            password: Some("secret".to_string()),
            uuid: None,
            client_type: "RST".to_string(),
            serialization_version: 1,
            client_hazelcast_version: "0.1.0".to_string(),
            client_name: "hz.client_1".to_string(),
            labels: vec!["blue".to_string(), "edge".to_string()],
        }
    }

    #[test]
    fn test_request_layout() {
        let message = encode_request(&request());
        let initial = message.initial_frame().unwrap();
        assert_eq!(initial.content.len(), 16 + 17 + 1);
        // Null UUID: only the is-null byte is set.
        assert_eq!(initial.content[REQUEST_UUID_OFFSET], 1);
        assert_eq!(initial.content[REQUEST_SERIALIZATION_VERSION_OFFSET], 1);
        assert_eq!(message.operation_name(), Some(OPERATION_NAME));
        assert!(message.is_retryable());
    }

    #[test]
    fn test_request_round_trip() {
        let mut params = request();
        params.uuid = Some(Uuid::new_v4());
        params.username = Some("admin".to_string());
        assert_eq!(decode_request(&encode_request(&params)).unwrap(), params);
        assert_eq!(decode_request(&encode_request(&request())).unwrap(), request());
    }

    #[test]
    fn test_response_round_trip() {
        let params = ResponseParameters {
            status: 0,
            address: Some(Address::new("127.0.0.1", 5701)),
            member_uuid: Some(Uuid::new_v4()),
            serialization_version: 1,
            server_hazelcast_version: "5.3.0".to_string(),
            partition_count: 271,
            cluster_id: Uuid::new_v4(),
            failover_supported: false,
        };
        let message = encode_response(&params);
        assert_eq!(message.initial_frame().unwrap().content.len(), 13 + 1 + 17 + 1 + 4 + 17 + 1);
        assert_eq!(decode_response(&message).unwrap(), params);

        let failed = ResponseParameters {
            status: 1,
            address: None,
            member_uuid: None,
            ..params
        };
        assert_eq!(decode_response(&encode_response(&failed)).unwrap(), failed);
    }

    #[test]
    fn test_request_is_not_a_response() {
        assert!(matches!(
            decode_response(&encode_request(&request())),
            Err(ProtocolError::UnexpectedMessageType {
                expected: RESPONSE_MESSAGE_TYPE,
                actual: REQUEST_MESSAGE_TYPE
            })
        ));
    }
}

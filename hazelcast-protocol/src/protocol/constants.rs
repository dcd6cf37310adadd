//! Protocol constants for the Hazelcast Open Binary Client Protocol.

/// Size of the frame length field in bytes.
pub const SIZE_OF_FRAME_LENGTH_FIELD: usize = 4;

/// Size of the frame flags field in bytes.
pub const SIZE_OF_FRAME_FLAGS_FIELD: usize = 2;

/// Total frame header size (length + flags).
///
/// The length field written on the wire counts these header bytes too.
pub const SIZE_OF_FRAME_LENGTH_AND_FLAGS: usize =
    SIZE_OF_FRAME_LENGTH_FIELD + SIZE_OF_FRAME_FLAGS_FIELD;

/// First frame of a message fragment.
pub const BEGIN_FRAGMENT_FLAG: u16 = 1 << 15;

/// Last frame of a message fragment.
pub const END_FRAGMENT_FLAG: u16 = 1 << 14;

/// Last frame of a message on the wire.
pub const IS_FINAL_FLAG: u16 = 1 << 13;

/// Opens a nested data structure (list, custom type).
pub const BEGIN_DATA_STRUCTURE_FLAG: u16 = 1 << 12;

/// Closes a nested data structure.
pub const END_DATA_STRUCTURE_FLAG: u16 = 1 << 11;

/// Marks a structurally absent value.
pub const IS_NULL_FLAG: u16 = 1 << 10;

/// Marks the initial frame of an event message.
pub const IS_EVENT_FLAG: u16 = 1 << 9;

/// Request whose response may be acknowledged by backups.
pub const BACKUP_AWARE_FLAG: u16 = 1 << 8;

/// Marks a backup acknowledgement event.
pub const BACKUP_EVENT_FLAG: u16 = 1 << 7;

/// Default frame flags (no special flags set).
pub const DEFAULT_FLAGS: u16 = 0;

/// Flags of every initial frame of a message that is not fragmented.
pub const UNFRAGMENTED_MESSAGE: u16 = BEGIN_FRAGMENT_FLAG | END_FRAGMENT_FLAG;

/// Size of an encoded byte.
pub const BYTE_SIZE_IN_BYTES: usize = 1;

/// Size of an encoded boolean.
pub const BOOLEAN_SIZE_IN_BYTES: usize = 1;

/// Size of an encoded 32-bit integer.
pub const INT_SIZE_IN_BYTES: usize = 4;

/// Size of an encoded 64-bit integer.
pub const LONG_SIZE_IN_BYTES: usize = 8;

/// Size of an encoded UUID: is-null flag plus two 64-bit halves.
pub const UUID_SIZE_IN_BYTES: usize = BOOLEAN_SIZE_IN_BYTES + 2 * LONG_SIZE_IN_BYTES;

/// Offset of message type in initial frame content.
pub const TYPE_FIELD_OFFSET: usize = 0;

/// Offset of correlation ID in initial frame content.
pub const CORRELATION_ID_FIELD_OFFSET: usize = TYPE_FIELD_OFFSET + INT_SIZE_IN_BYTES;

/// Offset of partition ID in request and event initial frames.
pub const PARTITION_ID_FIELD_OFFSET: usize = CORRELATION_ID_FIELD_OFFSET + LONG_SIZE_IN_BYTES;

/// Offset of backup acks count in response initial frames.
pub const RESPONSE_BACKUP_ACKS_FIELD_OFFSET: usize =
    CORRELATION_ID_FIELD_OFFSET + LONG_SIZE_IN_BYTES;

/// Size of the request initial frame header; request fields start here.
pub const REQUEST_INITIAL_FRAME_SIZE: usize = PARTITION_ID_FIELD_OFFSET + INT_SIZE_IN_BYTES;

/// Size of the response initial frame header; response fields start here.
pub const RESPONSE_INITIAL_FRAME_SIZE: usize =
    RESPONSE_BACKUP_ACKS_FIELD_OFFSET + BYTE_SIZE_IN_BYTES;

/// Size of the event initial frame header; event fields start here.
pub const EVENT_INITIAL_FRAME_SIZE: usize = PARTITION_ID_FIELD_OFFSET + INT_SIZE_IN_BYTES;

/// Offset of the fragmentation id in a fragment's leading frame.
pub const FRAGMENTATION_ID_OFFSET: usize = 0;

/// Partition ID indicating no specific partition (-1).
pub const PARTITION_ID_ANY: i32 = -1;

/// Message type of exception responses.
pub const EXCEPTION_MESSAGE_TYPE: i32 = 0;

//! Error types for encoding and decoding client protocol messages.

use std::io;
use thiserror::Error;

use crate::codec::custom::ErrorHolder;
use crate::config::ConfigError;

/// The error type for client protocol decoding and framing.
///
/// Every variant except [`ProtocolError::Io`] and [`ProtocolError::Config`]
/// signals a protocol or version mismatch with the peer. Such failures are
/// fatal to the invocation that produced the message and are never retried
/// by this layer.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A fixed-size field extends past the end of its frame.
    #[error("buffer underflow: {needed} bytes needed at offset {offset}, frame holds {available}")]
    BufferUnderflow {
        /// Offset of the field inside the frame content.
        offset: usize,
        /// Bytes required by the field.
        needed: usize,
        /// Bytes present in the frame content.
        available: usize,
    },

    /// The message ran out of frames while a decoder still expected one.
    #[error("missing frame: expected {0}")]
    MissingFrame(&'static str),

    /// A frame did not carry the flags the decoder expected at this position.
    #[error("unexpected frame: expected {expected}, found flags {flags:#06x}")]
    UnexpectedFrame {
        /// Description of the frame the decoder expected.
        expected: &'static str,
        /// Flags of the frame actually found.
        flags: u16,
    },

    /// The message type is not the one this codec decodes.
    #[error("unexpected message type: expected {expected:#08x}, found {actual:#08x}")]
    UnexpectedMessageType {
        /// Message type the codec was generated for.
        expected: i32,
        /// Message type found in the initial frame.
        actual: i32,
    },

    /// The member answered with an exception response.
    #[error("remote error: {}", describe_remote(.0))]
    Remote(Vec<ErrorHolder>),

    /// A string frame did not hold valid UTF-8.
    #[error("invalid UTF-8 in string frame: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// An entry list carried a different number of keys and values.
    #[error("entry list length mismatch: {keys} keys, {values} values")]
    EntryListLengthMismatch {
        /// Number of decoded keys.
        keys: usize,
        /// Number of decoded values.
        values: usize,
    },

    /// A packed fixed-size list frame is not a whole number of elements.
    #[error("fixed-size list frame of {length} bytes is not a multiple of {element_size}")]
    FixedListLength {
        /// Content length of the list frame.
        length: usize,
        /// Size of one element.
        element_size: usize,
    },

    /// A non-nullable fixed-size value was encoded as null.
    #[error("unexpected null {0}")]
    UnexpectedNull(&'static str),

    /// A list count field was negative.
    #[error("invalid element count {0}")]
    InvalidCount(i32),

    /// A frame header declared a length outside the accepted range.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// A frame or reassembled message exceeds the configured maximum.
    #[error("frame too large: {length} bytes exceeds maximum of {max}")]
    FrameTooLarge {
        /// Declared length.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// An empty message cannot be written to the wire.
    #[error("cannot encode empty message")]
    EmptyMessage,

    /// Invalid codec configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O errors surfaced by the framed transport.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn describe_remote(errors: &[ErrorHolder]) -> String {
    match errors.first() {
        Some(first) => match &first.message {
            Some(message) => format!("{} ({}): {}", first.class_name, first.error_code, message),
            None => format!("{} ({})", first.class_name, first.error_code),
        },
        None => "no error details".to_string(),
    }
}

/// A specialized `Result` type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_underflow_display() {
        let err = ProtocolError::BufferUnderflow {
            offset: 16,
            needed: 8,
            available: 20,
        };
        assert_eq!(
            err.to_string(),
            "buffer underflow: 8 bytes needed at offset 16, frame holds 20"
        );
    }

    #[test]
    fn test_unexpected_message_type_display() {
        let err = ProtocolError::UnexpectedMessageType {
            expected: 0x010101,
            actual: 0x010201,
        };
        assert_eq!(
            err.to_string(),
            "unexpected message type: expected 0x010101, found 0x010201"
        );
    }

    #[test]
    fn test_remote_error_display() {
        let err = ProtocolError::Remote(vec![ErrorHolder {
            error_code: 34,
            class_name: "java.lang.IllegalStateException".to_string(),
            message: Some("boom".to_string()),
            stack_trace_elements: Vec::new(),
        }]);
        assert_eq!(
            err.to_string(),
            "remote error: java.lang.IllegalStateException (34): boom"
        );

        let empty = ProtocolError::Remote(Vec::new());
        assert_eq!(empty.to_string(), "remote error: no error details");
    }

    #[test]
    fn test_utf8_error_conversion() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: ProtocolError = utf8_err.into();
        assert!(matches!(err, ProtocolError::InvalidUtf8(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed");
        let err: ProtocolError = io_err.into();
        assert!(matches!(err, ProtocolError::Io(_)));
        assert!(err.to_string().contains("stream closed"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProtocolError>();
    }
}

//! Server-side exceptions returned in error responses.
//!
//! An error response has message type 0 and carries a list of error holders,
//! the first being the thrown exception and the rest its causes.

use super::{begin_structure, open_structure, CustomCodec};
use crate::codec::fixed_size::{decode_int, encode_int};
use crate::codec::{list, nullable, string};
use crate::error::Result;
use crate::protocol::constants::*;
use crate::protocol::{ClientMessage, FixedLayout, ForwardFrameIterator, Frame};

const TRACE_LAYOUT: FixedLayout<1> = FixedLayout::custom([INT_SIZE_IN_BYTES]);
const LINE_NUMBER_OFFSET: usize = TRACE_LAYOUT.offset(0);

const HOLDER_LAYOUT: FixedLayout<1> = FixedLayout::custom([INT_SIZE_IN_BYTES]);
const ERROR_CODE_OFFSET: usize = HOLDER_LAYOUT.offset(0);

/// One frame of a remote stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTraceElement {
    /// Declaring class.
    pub class_name: String,
    /// Method name.
    pub method_name: String,
    /// Source file, when known.
    pub file_name: Option<String>,
    /// Source line, negative when unknown.
    pub line_number: i32,
}

impl CustomCodec for StackTraceElement {
    fn encode(message: &mut ClientMessage, value: &Self) {
        let mut initial = begin_structure(message, &TRACE_LAYOUT);
        encode_int(&mut initial.content, LINE_NUMBER_OFFSET, value.line_number);
        message.add(initial);
        string::encode(message, &value.class_name);
        string::encode(message, &value.method_name);
        nullable::encode_nullable(message, value.file_name.as_deref(), string::encode);
        message.add(Frame::new_end_frame());
    }

    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self> {
        let initial = open_structure(iterator)?;
        let line_number = decode_int(&initial.content, LINE_NUMBER_OFFSET)?;
        let class_name = string::decode(iterator)?;
        let method_name = string::decode(iterator)?;
        let file_name = nullable::decode_nullable(iterator, string::decode)?;
        iterator.fast_forward_to_end_frame()?;
        Ok(Self {
            class_name,
            method_name,
            file_name,
            line_number,
        })
    }
}

/// A remote exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorHolder {
    /// Protocol error code identifying the exception kind.
    pub error_code: i32,
    /// Fully qualified exception class.
    pub class_name: String,
    /// Exception message.
    pub message: Option<String>,
    /// Remote stack trace, innermost call first.
    pub stack_trace_elements: Vec<StackTraceElement>,
}

impl CustomCodec for ErrorHolder {
    fn encode(message: &mut ClientMessage, value: &Self) {
        let mut initial = begin_structure(message, &HOLDER_LAYOUT);
        encode_int(&mut initial.content, ERROR_CODE_OFFSET, value.error_code);
        message.add(initial);
        string::encode(message, &value.class_name);
        nullable::encode_nullable(message, value.message.as_deref(), string::encode);
        list::encode(message, &value.stack_trace_elements, StackTraceElement::encode);
        message.add(Frame::new_end_frame());
    }

    fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Self> {
        let initial = open_structure(iterator)?;
        let error_code = decode_int(&initial.content, ERROR_CODE_OFFSET)?;
        let class_name = string::decode(iterator)?;
        let message = nullable::decode_nullable(iterator, string::decode)?;
        let stack_trace_elements = list::decode(iterator, StackTraceElement::decode)?;
        iterator.fast_forward_to_end_frame()?;
        Ok(Self {
            error_code,
            class_name,
            message,
            stack_trace_elements,
        })
    }
}

/// Builds an error response carrying `errors`.
pub fn encode_errors(errors: &[ErrorHolder]) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    let mut initial = Frame::new_initial_frame(RESPONSE_INITIAL_FRAME_SIZE);
    encode_int(&mut initial.content, TYPE_FIELD_OFFSET, EXCEPTION_MESSAGE_TYPE);
    message.add(initial);
    list::encode(&mut message, errors, ErrorHolder::encode);
    message
}

/// Reads the error holders of an error response.
pub fn decode_errors(message: &ClientMessage) -> Result<Vec<ErrorHolder>> {
    let mut iterator = message.frame_iterator();
    iterator.expect_next("initial frame")?;
    list::decode(&mut iterator, ErrorHolder::decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(code: i32, message: Option<&str>) -> ErrorHolder {
        ErrorHolder {
            error_code: code,
            class_name: "java.lang.IllegalStateException".to_string(),
            message: message.map(str::to_string),
            stack_trace_elements: vec![
                StackTraceElement {
                    class_name: "com.hazelcast.map.impl.MapService".to_string(),
                    method_name: "put".to_string(),
                    file_name: Some("MapService.java".to_string()),
                    line_number: 120,
                },
                StackTraceElement {
                    class_name: "Native".to_string(),
                    method_name: "call".to_string(),
                    file_name: None,
                    line_number: -2,
                },
            ],
        }
    }

    #[test]
    fn test_error_response_header() {
        let msg = encode_errors(&[holder(5, Some("boom"))]);
        assert_eq!(msg.message_type(), Some(EXCEPTION_MESSAGE_TYPE));
        assert_eq!(
            msg.frames()[0].content.len(),
            RESPONSE_INITIAL_FRAME_SIZE
        );
        assert!(msg.frames()[0].is_unfragmented());
    }

    #[test]
    fn test_error_chain() {
        let errors = vec![holder(5, Some("boom")), holder(1, None)];
        let msg = encode_errors(&errors);
        assert_eq!(decode_errors(&msg).unwrap(), errors);
    }

    #[test]
    fn test_truncated_error_response() {
        let mut frames = encode_errors(&[holder(5, None)]).into_frames();
        frames.truncate(4);
        let msg = ClientMessage::from_frames(frames);
        assert!(decode_errors(&msg).is_err());
    }
}

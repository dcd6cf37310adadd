//! Initial-frame helpers shared by the operation codecs.

use hazelcast_protocol::codec::fixed_size::{decode_int, encode_int};
use hazelcast_protocol::protocol::{
    ForwardFrameIterator, Frame, EXCEPTION_MESSAGE_TYPE, IS_EVENT_FLAG, PARTITION_ID_ANY,
    PARTITION_ID_FIELD_OFFSET, TYPE_FIELD_OFFSET,
};
use hazelcast_protocol::{ClientMessage, ProtocolError, Result};

/// Starts a request carrying the invocation metadata of its operation.
pub(crate) fn request_message(operation_name: &'static str, retryable: bool) -> ClientMessage {
    let mut message = ClientMessage::create_for_encode();
    message.set_retryable(retryable);
    message.set_operation_name(operation_name);
    message
}

/// Zeroed request initial frame with its type set and no partition.
///
/// The invocation layer overwrites the partition id for keyed operations.
pub(crate) fn request_frame(message_type: i32, frame_size: usize) -> Frame {
    let mut frame = Frame::new_initial_frame(frame_size);
    encode_int(&mut frame.content, TYPE_FIELD_OFFSET, message_type);
    encode_int(&mut frame.content, PARTITION_ID_FIELD_OFFSET, PARTITION_ID_ANY);
    frame
}

/// Zeroed response initial frame with its type set.
pub(crate) fn response_frame(message_type: i32, frame_size: usize) -> Frame {
    let mut frame = Frame::new_initial_frame(frame_size);
    encode_int(&mut frame.content, TYPE_FIELD_OFFSET, message_type);
    frame
}

/// Zeroed event initial frame with its type and the event flag set.
pub(crate) fn event_frame(message_type: i32, frame_size: usize) -> Frame {
    let mut frame = request_frame(message_type, frame_size);
    frame.add_flags(IS_EVENT_FLAG);
    frame
}

/// Checks the message type and returns a cursor past the initial frame,
/// together with that frame.
pub(crate) fn open(
    message: &ClientMessage,
    expected: i32,
) -> Result<(ForwardFrameIterator<'_>, &Frame)> {
    message.expect_message_type(expected)?;
    let mut iterator = message.frame_iterator();
    let initial = iterator.expect_next("initial frame")?;
    Ok((iterator, initial))
}

/// Reads the type of a message delivered to a listener.
///
/// Only event types pass. An exception response becomes
/// [`ProtocolError::Remote`], and the listener operation's own request or
/// response type is [`ProtocolError::UnexpectedMessageType`] against
/// `event_type`. A missing or short initial frame is an error too.
pub(crate) fn event_message_type(
    message: &ClientMessage,
    event_type: i32,
    operation_types: [i32; 2],
) -> Result<i32> {
    let initial = message
        .initial_frame()
        .ok_or(ProtocolError::MissingFrame("initial frame"))?;
    let actual = decode_int(&initial.content, TYPE_FIELD_OFFSET)?;
    if actual == EXCEPTION_MESSAGE_TYPE || operation_types.contains(&actual) {
        message.expect_message_type(event_type)?;
    }
    Ok(actual)
}

/// Returns a cursor past the initial frame of an event whose type the caller
/// already matched.
///
/// The initial frame must carry the event flag.
pub(crate) fn open_event(message: &ClientMessage) -> Result<(ForwardFrameIterator<'_>, &Frame)> {
    let mut iterator = message.frame_iterator();
    let initial = iterator.expect_next("initial frame")?;
    if !initial.is_event_frame() {
        return Err(ProtocolError::UnexpectedFrame {
            expected: "event initial frame",
            flags: initial.flags,
        });
    }
    Ok((iterator, initial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazelcast_protocol::protocol::{REQUEST_INITIAL_FRAME_SIZE, RESPONSE_INITIAL_FRAME_SIZE};

    #[test]
    fn test_request_frame_header() {
        let mut message = request_message("Map.Size", true);
        message.add(request_frame(0x012A00, REQUEST_INITIAL_FRAME_SIZE));
        assert_eq!(message.message_type(), Some(0x012A00));
        assert_eq!(message.partition_id(), Some(PARTITION_ID_ANY));
        assert_eq!(message.correlation_id(), Some(0));
        assert!(message.is_retryable());
        assert_eq!(message.operation_name(), Some("Map.Size"));
    }

    #[test]
    fn test_event_frame_is_flagged() {
        let frame = event_frame(0x011902, REQUEST_INITIAL_FRAME_SIZE);
        assert!(frame.is_event_frame());
        assert!(frame.is_unfragmented());
    }

    #[test]
    fn test_open_checks_type() {
        let message = ClientMessage::from_frames(vec![response_frame(
            0x012A01,
            RESPONSE_INITIAL_FRAME_SIZE,
        )]);
        assert!(open(&message, 0x012A01).is_ok());
        assert!(matches!(
            open(&message, 0x010201),
            Err(ProtocolError::UnexpectedMessageType { .. })
        ));
    }

    #[test]
    fn test_event_message_type_rejects_operation_types() {
        let event = ClientMessage::from_frames(vec![event_frame(0x011902, REQUEST_INITIAL_FRAME_SIZE)]);
        assert_eq!(
            event_message_type(&event, 0x011902, [0x011900, 0x011901]).unwrap(),
            0x011902
        );

        let response = ClientMessage::from_frames(vec![response_frame(
            0x011901,
            RESPONSE_INITIAL_FRAME_SIZE,
        )]);
        assert!(matches!(
            event_message_type(&response, 0x011902, [0x011900, 0x011901]),
            Err(ProtocolError::UnexpectedMessageType {
                expected: 0x011902,
                actual: 0x011901
            })
        ));

        let unknown = ClientMessage::from_frames(vec![event_frame(0x01197F, REQUEST_INITIAL_FRAME_SIZE)]);
        assert_eq!(
            event_message_type(&unknown, 0x011902, [0x011900, 0x011901]).unwrap(),
            0x01197F
        );
    }

    #[test]
    fn test_event_message_type_needs_a_header() {
        assert!(matches!(
            event_message_type(&ClientMessage::new(), 1, [2, 3]),
            Err(ProtocolError::MissingFrame(_))
        ));
        let short = ClientMessage::from_frames(vec![Frame::from_slice(&[1, 2])]);
        assert!(matches!(
            event_message_type(&short, 1, [2, 3]),
            Err(ProtocolError::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_open_event_requires_event_flag() {
        let flagged = ClientMessage::from_frames(vec![event_frame(0x011902, REQUEST_INITIAL_FRAME_SIZE)]);
        assert!(open_event(&flagged).is_ok());

        let plain = ClientMessage::from_frames(vec![request_frame(0x011902, REQUEST_INITIAL_FRAME_SIZE)]);
        assert!(matches!(
            open_event(&plain),
            Err(ProtocolError::UnexpectedFrame { .. })
        ));
    }
}

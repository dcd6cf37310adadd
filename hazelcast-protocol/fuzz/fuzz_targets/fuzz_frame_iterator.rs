#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;

use hazelcast_protocol::codec::custom::{Address, ErrorHolder, MemberInfo};
use hazelcast_protocol::codec::{entry_list, list, string, CustomCodec, NullEncoding};
use hazelcast_protocol::protocol::{ClientMessage, Frame};

// Decoders run against arbitrary frame sequences must fail cleanly.
fuzz_target!(|data: &[u8]| {
    let mut buf = BytesMut::from(data);
    let mut frames = Vec::new();
    while let Ok(Some(frame)) = Frame::read_from(&mut buf) {
        frames.push(frame);
    }
    let msg = ClientMessage::from_frames(frames);

    let _ = list::decode(&mut msg.frame_iterator(), string::decode);
    let _ = list::decode_counted(&mut msg.frame_iterator(), string::decode);
    let _ = entry_list::decode_uuid_int_list(&mut msg.frame_iterator());
    let _ = entry_list::decode_fixed::<uuid::Uuid, i64>(&mut msg.frame_iterator());
    let _ = NullEncoding::PresenceFlag.decode(&mut msg.frame_iterator(), string::decode);
    let _ = Address::decode(&mut msg.frame_iterator());
    let _ = MemberInfo::decode(&mut msg.frame_iterator());
    let _ = ErrorHolder::decode(&mut msg.frame_iterator());

    let mut iter = msg.frame_iterator();
    if iter.expect_begin_frame().is_ok() {
        let _ = iter.fast_forward_to_end_frame();
    }
});

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;

use hazelcast_protocol::protocol::Frame;

// Every frame that parses must serialize back to the bytes it came from.
fuzz_target!(|data: &[u8]| {
    let mut src = BytesMut::from(data);
    let mut consumed = 0;
    let mut rewritten = BytesMut::new();

    while let Ok(Some(frame)) = Frame::read_from(&mut src) {
        consumed += frame.wire_size();
        frame.write_to(&mut rewritten);
    }

    assert_eq!(&rewritten[..], &data[..consumed]);
});

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;

use hazelcast_protocol::protocol::ClientMessageCodec;
use hazelcast_protocol::CodecConfig;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let config = CodecConfig::builder()
        .max_frame_length(64 * 1024)
        .max_message_length(256 * 1024)
        .max_pending_fragments(8)
        .build()
        .expect("valid fuzz config");
    let mut codec = ClientMessageCodec::with_config(config);
    let mut buf = BytesMut::from(data);

    loop {
        match codec.decode(&mut buf) {
            Ok(Some(msg)) => {
                let _ = msg.message_type();
                let _ = msg.correlation_id();
                let _ = msg.partition_id();
                let _ = msg.number_of_backup_acks();
                let _ = msg.frame_count();
                let _ = msg.is_event();
                let _ = msg.wire_size();
                let _ = msg.expect_message_type(0x010201);
            }
            Ok(None) => break,
            Err(_) => break,
        }
    }
});

//! Messages moved through `tokio_util` framed I/O over an in-memory duplex
//! stream.

use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{FramedRead, FramedWrite};

use hazelcast_protocol::codec::fixed_size::encode_int;
use hazelcast_protocol::codec::string;
use hazelcast_protocol::protocol::{
    ClientMessageCodec, Frame, PARTITION_ID_FIELD_OFFSET, REQUEST_INITIAL_FRAME_SIZE,
    TYPE_FIELD_OFFSET,
};
use hazelcast_protocol::{ClientMessage, CodecConfig, ProtocolError};

fn map_put(partition_id: i32, key: &str, value_len: usize) -> ClientMessage {
    let mut msg = ClientMessage::create_for_encode();
    let mut initial = Frame::new_initial_frame(REQUEST_INITIAL_FRAME_SIZE);
    encode_int(&mut initial.content, TYPE_FIELD_OFFSET, 0x010100);
    encode_int(&mut initial.content, PARTITION_ID_FIELD_OFFSET, partition_id);
    msg.add(initial);
    string::encode(&mut msg, "orders");
    string::encode(&mut msg, key);
    msg.add(Frame::from_slice(&vec![0xAB; value_len]));
    msg
}

#[tokio::test]
async fn test_messages_cross_the_stream_in_order() {
    let (client, server) = tokio::io::duplex(64);
    let mut writer = FramedWrite::new(client, ClientMessageCodec::new());
    let mut reader = FramedRead::new(server, ClientMessageCodec::new());

    let sent: Vec<ClientMessage> = (0..5).map(|i| map_put(i, &format!("k{i}"), 100)).collect();
    let expected = sent.clone();

    let send = tokio::spawn(async move {
        for msg in sent {
            writer.send(msg).await.unwrap();
        }
    });

    for want in expected {
        let got = reader.next().await.unwrap().unwrap();
        assert_eq!(got, want);
    }
    send.await.unwrap();
}

#[tokio::test]
async fn test_fragmented_message_crosses_the_stream() {
    let config = CodecConfig::builder().max_fragment_size(128).build().unwrap();
    let (client, server) = tokio::io::duplex(1024);
    let mut writer = FramedWrite::new(client, ClientMessageCodec::with_config(config));
    let mut reader = FramedRead::new(server, ClientMessageCodec::new());

    let mut big = map_put(3, "large", 90);
    for _ in 0..8 {
        big.add(Frame::from_slice(&[7; 90]));
    }
    let small = map_put(4, "small", 1);

    let (big_clone, small_clone) = (big.clone(), small.clone());
    let send = tokio::spawn(async move {
        writer.send(big_clone).await.unwrap();
        writer.send(small_clone).await.unwrap();
    });

    assert_eq!(reader.next().await.unwrap().unwrap(), big);
    assert_eq!(reader.next().await.unwrap().unwrap(), small);
    send.await.unwrap();
}

#[tokio::test]
async fn test_oversized_frame_ends_the_stream_with_an_error() {
    let config = CodecConfig::builder().max_frame_length(256).build().unwrap();
    let (mut client, server) = tokio::io::duplex(4096);
    let mut reader = FramedRead::new(server, ClientMessageCodec::with_config(config));

    let mut buf = BytesMut::new();
    map_put(0, "k", 1024).write_to(&mut buf);
    client.write_all(&buf).await.unwrap();

    match reader.next().await {
        Some(Err(ProtocolError::FrameTooLarge { max: 256, .. })) => {}
        other => panic!("expected FrameTooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn test_truncated_stream_reports_eof_error() {
    let (mut client, server) = tokio::io::duplex(4096);
    let mut reader = FramedRead::new(server, ClientMessageCodec::new());

    let mut buf = BytesMut::new();
    map_put(0, "k", 10).write_to(&mut buf);
    client.write_all(&buf[..buf.len() - 3]).await.unwrap();
    drop(client);

    assert!(matches!(reader.next().await, Some(Err(ProtocolError::Io(_)))));
}

//! Opaque serialized-object blobs.

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::{ClientMessage, ForwardFrameIterator, Frame};

/// An already-serialized object.
///
/// Produced and consumed by the serialization engine; the codec layer only
/// moves the bytes between typed parameters and frames and never looks
/// inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Data(Bytes);

impl Data {
    /// Wraps serialized bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Returns the serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the blob and returns its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Length of the serialized form.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<Bytes> for Data {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<&'static [u8]> for Data {
    fn from(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Appends the blob as one frame; its length is the frame length.
pub fn encode(message: &mut ClientMessage, data: &Data) {
    message.add(Frame::from_slice(data.as_bytes()));
}

/// Reads one frame as a blob.
pub fn decode(iterator: &mut ForwardFrameIterator<'_>) -> Result<Data> {
    let frame = iterator.expect_next("data frame")?;
    Ok(Data(Bytes::copy_from_slice(&frame.content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_frame_holds_bytes_verbatim() {
        let data = Data::from(vec![0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xF9, 1, 2]);
        let mut msg = ClientMessage::create_for_encode();
        encode(&mut msg, &data);

        assert_eq!(&msg.frames()[0].content[..], data.as_bytes());
        assert_eq!(decode(&mut msg.frame_iterator()).unwrap(), data);
    }

    #[test]
    fn test_data_accessors() {
        let data = Data::from(&b"abc"[..]);
        assert_eq!(data.len(), 3);
        assert!(!data.is_empty());
        assert_eq!(data.as_ref(), b"abc");
        assert_eq!(data.clone().into_bytes(), Bytes::from_static(b"abc"));
        assert!(Data::default().is_empty());
    }
}

//! Compile-time layout of fixed-size fields inside an initial frame.

use super::constants::*;

/// Offsets of `N` fixed-size fields packed back to back after a base offset.
///
/// Field offsets are a pure function of the base and the ordered field
/// sizes, evaluated in `const` context:
///
/// ```
/// use hazelcast_protocol::protocol::{FixedLayout, REQUEST_INITIAL_FRAME_SIZE};
/// use hazelcast_protocol::protocol::constants::{BOOLEAN_SIZE_IN_BYTES, LONG_SIZE_IN_BYTES};
///
/// const LAYOUT: FixedLayout<2> =
///     FixedLayout::request([LONG_SIZE_IN_BYTES, BOOLEAN_SIZE_IN_BYTES]);
/// const DELTA_OFFSET: usize = LAYOUT.offset(0);
/// const FLAG_OFFSET: usize = LAYOUT.offset(1);
///
/// assert_eq!(DELTA_OFFSET, REQUEST_INITIAL_FRAME_SIZE);
/// assert_eq!(FLAG_OFFSET, DELTA_OFFSET + 8);
/// assert_eq!(LAYOUT.frame_size(), FLAG_OFFSET + 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLayout<const N: usize> {
    offsets: [usize; N],
    frame_size: usize,
}

impl<const N: usize> FixedLayout<N> {
    /// Lays out `sizes` in order starting at `base`.
    pub const fn new(base: usize, sizes: [usize; N]) -> Self {
        let mut offsets = [0usize; N];
        let mut cursor = base;
        let mut i = 0;
        while i < N {
            offsets[i] = cursor;
            cursor += sizes[i];
            i += 1;
        }
        Self {
            offsets,
            frame_size: cursor,
        }
    }

    /// Fields of a request, after the request header.
    pub const fn request(sizes: [usize; N]) -> Self {
        Self::new(REQUEST_INITIAL_FRAME_SIZE, sizes)
    }

    /// Fields of a response, after the response header.
    pub const fn response(sizes: [usize; N]) -> Self {
        Self::new(RESPONSE_INITIAL_FRAME_SIZE, sizes)
    }

    /// Fields of an event, after the event header.
    pub const fn event(sizes: [usize; N]) -> Self {
        Self::new(EVENT_INITIAL_FRAME_SIZE, sizes)
    }

    /// Fields of a custom type's initial frame, which has no header.
    pub const fn custom(sizes: [usize; N]) -> Self {
        Self::new(0, sizes)
    }

    /// Offset of the field at `index`.
    pub const fn offset(&self, index: usize) -> usize {
        self.offsets[index]
    }

    /// Size of an initial frame holding every field.
    pub const fn frame_size(&self) -> usize {
        self.frame_size
    }
}

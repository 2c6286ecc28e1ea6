//! Raw kernel event payloads.

use bytes::Bytes;

/// One kernel routing datagram, copied out of the capture scratch buffer
/// at read time.
#[derive(Clone, Debug)]
pub struct RawEvent {
    /// Capture timestamp in nanoseconds since the Unix epoch.
    pub timestamp: u64,

    /// Immutable payload. Never aliases the capture buffer, which is
    /// overwritten by the next read.
    pub payload: Bytes,
}

impl RawEvent {
    /// Creates an event from an already-owned payload.
    #[inline]
    pub fn new(timestamp: u64, payload: Bytes) -> Self {
        Self { timestamp, payload }
    }

    /// Creates an event by copying exactly `data.len()` bytes.
    #[inline]
    pub fn from_slice(timestamp: u64, data: &[u8]) -> Self {
        Self {
            timestamp,
            payload: Bytes::copy_from_slice(data),
        }
    }
}

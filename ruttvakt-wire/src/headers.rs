//! Fixed-layout header decoders for the three kernel record shapes.
//!
//! Each decoder validates the buffer length against the header's fixed
//! size, then reads the declared fields little-endian off a byte cursor.
//! There is no partial success: a short buffer is a `Truncated` outcome
//! the caller drops, never an exception path.

use bytes::Buf;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Buffer shorter than the fixed header size")]
    Truncated,
}

/// Generic routing-message header, first in every datagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteMessageHeader {
    pub msglen: u16,
    pub version: u8,
    pub msg_type: u8,
    pub index: u16,
    pub flags: i32,
    pub addrs: i32,
    pub pid: i32,
    pub seq: i32,
}

impl RouteMessageHeader {
    /// Packed size of the declared fields.
    pub const SIZE: usize = 22;

    pub fn decode(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < Self::SIZE {
            return Err(HeaderError::Truncated);
        }
        let mut cur = data;
        let msglen = cur.get_u16_le();
        let version = cur.get_u8();
        let msg_type = cur.get_u8();
        let index = cur.get_u16_le();
        let flags = cur.get_i32_le();
        let addrs = cur.get_i32_le();
        let pid = cur.get_i32_le();
        let seq = cur.get_i32_le();
        Ok(Self {
            msglen,
            version,
            msg_type,
            index,
            flags,
            addrs,
            pid,
            seq,
        })
    }
}

/// Interface-state header, valid for RTM_IFINFO messages.
///
/// The kernel appends interface statistics (if_data) after the fixed
/// fields; this observer does not decode them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceInfoHeader {
    pub msglen: u16,
    pub version: u8,
    pub msg_type: u8,
    pub addrs: i32,
    pub flags: i32,
    pub index: u16,
}

impl InterfaceInfoHeader {
    /// Fixed size including the two trailing pad bytes.
    pub const SIZE: usize = 16;

    pub fn decode(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < Self::SIZE {
            return Err(HeaderError::Truncated);
        }
        let mut cur = data;
        let msglen = cur.get_u16_le();
        let version = cur.get_u8();
        let msg_type = cur.get_u8();
        let addrs = cur.get_i32_le();
        let flags = cur.get_i32_le();
        let index = cur.get_u16_le();
        Ok(Self {
            msglen,
            version,
            msg_type,
            addrs,
            flags,
            index,
        })
    }
}

/// Interface-address header, valid for RTM_NEWADDR and RTM_DELADDR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceAddressHeader {
    pub msglen: u16,
    pub version: u8,
    pub msg_type: u8,
    pub addrs: i32,
    pub flags: i32,
    pub index: u16,
    pub metric: i32,
}

impl InterfaceAddressHeader {
    /// Fixed size including the two pad bytes before the metric.
    pub const SIZE: usize = 20;

    pub fn decode(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < Self::SIZE {
            return Err(HeaderError::Truncated);
        }
        let mut cur = data;
        let msglen = cur.get_u16_le();
        let version = cur.get_u8();
        let msg_type = cur.get_u8();
        let addrs = cur.get_i32_le();
        let flags = cur.get_i32_le();
        let index = cur.get_u16_le();
        cur.advance(2);
        let metric = cur.get_i32_le();
        Ok(Self {
            msglen,
            version,
            msg_type,
            addrs,
            flags,
            index,
            metric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_route_message_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&128u16.to_le_bytes());
        data.push(5); // version
        data.push(0xc); // type
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&0x11i32.to_le_bytes());
        data.extend_from_slice(&0x20i32.to_le_bytes());
        data.extend_from_slice(&4242i32.to_le_bytes());
        data.extend_from_slice(&7i32.to_le_bytes());
        assert_eq!(data.len(), RouteMessageHeader::SIZE);

        let header = RouteMessageHeader::decode(&data).unwrap();
        assert_eq!(header.msglen, 128);
        assert_eq!(header.version, 5);
        assert_eq!(header.msg_type, 0xc);
        assert_eq!(header.index, 3);
        assert_eq!(header.flags, 0x11);
        assert_eq!(header.addrs, 0x20);
        assert_eq!(header.pid, 4242);
        assert_eq!(header.seq, 7);
    }

    #[test]
    fn route_header_rejects_short_buffer() {
        let data = [0u8; RouteMessageHeader::SIZE - 1];
        assert_eq!(
            RouteMessageHeader::decode(&data),
            Err(HeaderError::Truncated)
        );
    }

    #[test]
    fn decodes_interface_info_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&112u16.to_le_bytes());
        data.push(5);
        data.push(0xe);
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&0x8843i32.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&[0, 0]); // pad
        assert_eq!(data.len(), InterfaceInfoHeader::SIZE);

        let header = InterfaceInfoHeader::decode(&data).unwrap();
        assert_eq!(header.msglen, 112);
        assert_eq!(header.msg_type, 0xe);
        assert_eq!(header.flags, 0x8843);
        assert_eq!(header.index, 2);
    }

    #[test]
    fn decodes_interface_address_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&48u16.to_le_bytes());
        data.push(5);
        data.push(0xd);
        data.extend_from_slice(&0x20i32.to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&9u16.to_le_bytes());
        data.extend_from_slice(&[0, 0]); // pad
        data.extend_from_slice(&(-1i32).to_le_bytes());
        assert_eq!(data.len(), InterfaceAddressHeader::SIZE);

        let header = InterfaceAddressHeader::decode(&data).unwrap();
        assert_eq!(header.msg_type, 0xd);
        assert_eq!(header.addrs, 0x20);
        assert_eq!(header.index, 9);
        assert_eq!(header.metric, -1);
    }

    #[test]
    fn interface_headers_reject_short_buffers() {
        assert_eq!(
            InterfaceInfoHeader::decode(&[0u8; 15]),
            Err(HeaderError::Truncated)
        );
        assert_eq!(
            InterfaceAddressHeader::decode(&[0u8; 19]),
            Err(HeaderError::Truncated)
        );
    }
}

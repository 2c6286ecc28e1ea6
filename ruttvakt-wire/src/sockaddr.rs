//! Variable-length sockaddr record decoding.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::consts::{AF_INET, AF_INET6};

/// Address family tag carried in byte 1 of a sockaddr record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
    Other(u8),
}

impl AddressFamily {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            AF_INET => Self::Ipv4,
            AF_INET6 => Self::Ipv6,
            other => Self::Other(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
            Self::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded sockaddr record.
///
/// `len` is the record's declared length as found on the wire, which the
/// sub-record walker needs for offset stepping even when no address could
/// be extracted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SockaddrRecord {
    pub len: u8,
    pub family: AddressFamily,
    pub addr: Option<IpAddr>,
}

impl SockaddrRecord {
    /// Decodes one sockaddr record from the start of `data`.
    ///
    /// Never fails: a record too short or of an unsupported family still
    /// yields its declared length so the caller can step past it. Every
    /// length check precedes the corresponding slice access.
    pub fn decode(data: &[u8]) -> Self {
        if data.len() < 2 {
            return Self {
                len: data.first().copied().unwrap_or(0),
                family: AddressFamily::Other(0),
                addr: None,
            };
        }

        let len = data[0];
        let family = AddressFamily::from_tag(data[1]);

        let addr = match family {
            AddressFamily::Ipv4 if len >= 8 && data.len() >= 8 => Some(IpAddr::V4(
                Ipv4Addr::new(data[4], data[5], data[6], data[7]),
            )),
            AddressFamily::Ipv6 if len >= 26 && data.len() >= 24 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&data[8..24]);
                Some(IpAddr::V6(Ipv6Addr::from(octets)))
            }
            _ => None,
        };

        Self { len, family, addr }
    }
}

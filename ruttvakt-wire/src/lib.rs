//! # ruttvakt-wire
//!
//! Decoders for the BSD routing socket wire format: the fixed-layout
//! message headers, the variable-length sockaddr records trailing them,
//! and the dispatcher that turns one raw datagram into structured facts.
//!
//! All decoding is explicit field-by-field deserialization from a byte
//! cursor in a single declared byte order; nothing here relies on native
//! struct layout.

pub mod consts;
pub mod dispatch;
pub mod facts;
pub mod headers;
pub mod sockaddr;
pub mod walker;

pub use dispatch::{InterfaceResolver, MessageDispatcher, MessageKind};
pub use facts::{AddressAction, Fact};
pub use headers::{
    HeaderError, InterfaceAddressHeader, InterfaceInfoHeader, RouteMessageHeader,
};
pub use sockaddr::{AddressFamily, SockaddrRecord};
pub use walker::SlotRecord;

//! Classification and dispatch of raw routing datagrams.

use tracing::{debug, trace};

use crate::consts::{
    IFF_UP, RTM_ADD, RTM_CHANGE, RTM_DELADDR, RTM_DELETE, RTM_DELMADDR, RTM_GET, RTM_IFINFO,
    RTM_LOCK, RTM_LOSING, RTM_MISS, RTM_NEWADDR, RTM_NEWMADDR, RTM_REDIRECT, RTM_RESOLVE,
};
use crate::facts::{AddressAction, Fact};
use crate::headers::{InterfaceAddressHeader, InterfaceInfoHeader, RouteMessageHeader};
use crate::walker;

/// Resolves an interface index to its OS-assigned name.
///
/// Lookup lives outside this crate: the production implementation asks
/// the operating system, tests substitute a stub.
pub trait InterfaceResolver {
    fn name_by_index(&self, index: u16) -> Option<String>;
}

/// Message classification, mapped from the raw type code before any
/// further decoding. Adding a handler means adding a variant here, not
/// editing a monolithic switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Recognized route-table or multicast operation that this observer
    /// deliberately does not surface.
    Ignored(u8),
    /// Interface state changed.
    InterfaceInfo,
    /// Address added to an interface.
    AddressAdded,
    /// Address removed from an interface.
    AddressRemoved,
    /// Type code outside the known ABI set.
    Unknown(u8),
}

impl MessageKind {
    pub fn classify(msg_type: u8) -> Self {
        match msg_type {
            RTM_ADD | RTM_DELETE | RTM_CHANGE | RTM_GET | RTM_LOSING | RTM_REDIRECT | RTM_MISS
            | RTM_LOCK | RTM_RESOLVE | RTM_NEWMADDR | RTM_DELMADDR => Self::Ignored(msg_type),
            RTM_IFINFO => Self::InterfaceInfo,
            RTM_NEWADDR => Self::AddressAdded,
            RTM_DELADDR => Self::AddressRemoved,
            other => Self::Unknown(other),
        }
    }
}

/// Decodes one raw datagram into zero or more facts.
///
/// Stateless between calls; each datagram is decoded in isolation by
/// whichever worker pulled it off the bus.
#[derive(Clone, Debug)]
pub struct MessageDispatcher<R> {
    resolver: R,
}

impl<R: InterfaceResolver> MessageDispatcher<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Decodes `data` and returns the facts it carries. Buffers shorter
    /// than the generic header are dropped without decoding anything.
    pub fn dispatch(&self, data: &[u8]) -> Vec<Fact> {
        let header = match RouteMessageHeader::decode(data) {
            Ok(header) => header,
            Err(_) => {
                trace!(len = data.len(), "datagram shorter than route header, dropped");
                return Vec::new();
            }
        };

        match MessageKind::classify(header.msg_type) {
            MessageKind::Ignored(msg_type) => {
                trace!(msg_type, seq = header.seq, "route operation not surfaced");
                Vec::new()
            }
            MessageKind::InterfaceInfo => self.interface_info(data),
            MessageKind::AddressAdded => self.address_change(data, AddressAction::Added),
            MessageKind::AddressRemoved => self.address_change(data, AddressAction::Removed),
            MessageKind::Unknown(msg_type) => {
                debug!(msg_type, "unhandled routing message type");
                vec![Fact::UnhandledType { msg_type }]
            }
        }
    }

    fn interface_info(&self, data: &[u8]) -> Vec<Fact> {
        let header = match InterfaceInfoHeader::decode(data) {
            Ok(header) => header,
            Err(_) => return Vec::new(),
        };
        let name = self.resolver.name_by_index(header.index);
        vec![Fact::InterfaceState {
            index: header.index,
            name,
            flags: header.flags,
            up: header.flags & IFF_UP != 0,
        }]
    }

    fn address_change(&self, data: &[u8], action: AddressAction) -> Vec<Fact> {
        let header = match InterfaceAddressHeader::decode(data) {
            Ok(header) => header,
            Err(_) => return Vec::new(),
        };
        let name = self.resolver.name_by_index(header.index);
        let tail = &data[InterfaceAddressHeader::SIZE..];

        walker::ifa_addresses(header.addrs, tail)
            .into_iter()
            .map(|(family, addr)| Fact::AddressChange {
                index: header.index,
                name: name.clone(),
                family,
                action,
                addr,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{AF_INET, RTAX_IFA};
    use crate::sockaddr::AddressFamily;
    use std::net::{IpAddr, Ipv4Addr};

    #[derive(Clone)]
    struct StubResolver;

    impl InterfaceResolver for StubResolver {
        fn name_by_index(&self, index: u16) -> Option<String> {
            Some(format!("if{index}"))
        }
    }

    fn dispatcher() -> MessageDispatcher<StubResolver> {
        MessageDispatcher::new(StubResolver)
    }

    /// Interface-info datagram in the 16-byte ifm layout, padded past the
    /// generic header size.
    fn ifinfo_message(index: u16, flags: i32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&24u16.to_le_bytes());
        data.push(5);
        data.push(RTM_IFINFO);
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&flags.to_le_bytes());
        data.extend_from_slice(&index.to_le_bytes());
        data.extend_from_slice(&[0u8; 10]); // pad + trailing if_data bytes
        data
    }

    /// Address datagram: 20-byte ifam layout followed by the sub-records.
    fn address_message(msg_type: u8, index: u16, addrs: i32, tail: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        let msglen = (InterfaceAddressHeader::SIZE + tail.len()) as u16;
        data.extend_from_slice(&msglen.to_le_bytes());
        data.push(5);
        data.push(msg_type);
        data.extend_from_slice(&addrs.to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&index.to_le_bytes());
        data.extend_from_slice(&[0, 0]); // pad
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(tail);
        data
    }

    #[test]
    fn short_buffer_produces_no_facts() {
        for len in 0..RouteMessageHeader::SIZE {
            assert!(dispatcher().dispatch(&vec![0u8; len]).is_empty());
        }
    }

    #[test]
    fn interface_info_reports_up_state() {
        let facts = dispatcher().dispatch(&ifinfo_message(3, IFF_UP | 0x40));
        assert_eq!(
            facts,
            vec![Fact::InterfaceState {
                index: 3,
                name: Some("if3".into()),
                flags: IFF_UP | 0x40,
                up: true,
            }]
        );
    }

    #[test]
    fn interface_info_reports_down_state() {
        let facts = dispatcher().dispatch(&ifinfo_message(2, 0x40));
        match &facts[0] {
            Fact::InterfaceState { up, .. } => assert!(!up),
            other => panic!("unexpected fact: {other:?}"),
        }
    }

    #[test]
    fn new_address_with_ifa_slot_yields_one_ipv4_fact() {
        let tail = [8u8, AF_INET, 0, 0, 192, 168, 1, 1];
        let message = address_message(RTM_NEWADDR, 7, 1 << RTAX_IFA, &tail);
        let facts = dispatcher().dispatch(&message);
        assert_eq!(
            facts,
            vec![Fact::AddressChange {
                index: 7,
                name: Some("if7".into()),
                family: AddressFamily::Ipv4,
                action: AddressAction::Added,
                addr: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)),
            }]
        );
    }

    #[test]
    fn delete_address_is_tagged_removed() {
        let tail = [8u8, AF_INET, 0, 0, 10, 0, 0, 2];
        let message = address_message(RTM_DELADDR, 1, 1 << RTAX_IFA, &tail);
        let facts = dispatcher().dispatch(&message);
        match &facts[0] {
            Fact::AddressChange { action, addr, .. } => {
                assert_eq!(*action, AddressAction::Removed);
                assert_eq!(addr.to_string(), "10.0.0.2");
            }
            other => panic!("unexpected fact: {other:?}"),
        }
    }

    #[test]
    fn address_message_without_ifa_slot_yields_nothing() {
        use crate::consts::RTAX_DST;
        let tail = [8u8, AF_INET, 0, 0, 10, 0, 0, 1];
        let message = address_message(RTM_NEWADDR, 1, 1 << RTAX_DST, &tail);
        assert!(dispatcher().dispatch(&message).is_empty());
    }

    #[test]
    fn recognized_route_operations_are_silent() {
        for msg_type in [RTM_ADD, RTM_DELETE, RTM_GET, RTM_NEWMADDR, RTM_DELMADDR] {
            let mut data = vec![0u8; RouteMessageHeader::SIZE];
            data[3] = msg_type;
            assert!(dispatcher().dispatch(&data).is_empty());
        }
    }

    #[test]
    fn unknown_type_is_surfaced_as_diagnostic() {
        let mut data = vec![0u8; RouteMessageHeader::SIZE];
        data[3] = 0x2a;
        assert_eq!(
            dispatcher().dispatch(&data),
            vec![Fact::UnhandledType { msg_type: 0x2a }]
        );
    }

    #[test]
    fn classify_covers_the_known_abi() {
        assert_eq!(MessageKind::classify(RTM_IFINFO), MessageKind::InterfaceInfo);
        assert_eq!(MessageKind::classify(RTM_NEWADDR), MessageKind::AddressAdded);
        assert_eq!(MessageKind::classify(RTM_DELADDR), MessageKind::AddressRemoved);
        assert_eq!(MessageKind::classify(RTM_LOSING), MessageKind::Ignored(RTM_LOSING));
        assert_eq!(MessageKind::classify(0x7f), MessageKind::Unknown(0x7f));
    }
}

//! Bitmask-driven walk over the variable-length sub-records trailing an
//! address message.
//!
//! Slots are positionally significant: a cleared bit means that slot
//! occupies zero bytes in the trailing region, so the byte cursor moves
//! only for present slots, by the declared length rounded up to the
//! 4-byte boundary.

use std::net::IpAddr;

use crate::consts::{roundup, RTAX_IFA, RTAX_MAX, SA_ALIGN};
use crate::sockaddr::{AddressFamily, SockaddrRecord};

/// One present slot extracted from the trailing region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRecord {
    pub slot: usize,
    pub record: SockaddrRecord,
}

/// Walks the presence bitmask over `data`, decoding each present slot at
/// the running offset.
///
/// Tolerates unreliable total-length accounting: the walk stops when the
/// offset reaches the end of the buffer, and a record declaring length 0
/// ends it (such a record cannot advance the cursor).
pub fn walk_addr_slots(addrs: i32, data: &[u8]) -> Vec<SlotRecord> {
    let mut records = Vec::new();
    let mut offset = 0usize;

    for slot in 0..RTAX_MAX {
        if addrs & (1 << slot) == 0 {
            continue;
        }
        if offset >= data.len() {
            break;
        }

        let record = SockaddrRecord::decode(&data[offset..]);
        records.push(SlotRecord { slot, record });

        let stride = roundup(record.len as usize, SA_ALIGN);
        if stride == 0 {
            break;
        }
        offset += stride;
    }

    records
}

/// Extracts the interface's own addresses (slot IFA) from the trailing
/// region. Other present slots are consumed for offset accounting only.
pub fn ifa_addresses(addrs: i32, data: &[u8]) -> Vec<(AddressFamily, IpAddr)> {
    walk_addr_slots(addrs, data)
        .into_iter()
        .filter(|entry| entry.slot == RTAX_IFA)
        .filter_map(|entry| entry.record.addr.map(|addr| (entry.record.family, addr)))
        .collect()
}

//! Numeric constants fixed by the BSD routing socket ABI (net/route.h).

/// Route added.
pub const RTM_ADD: u8 = 0x1;
/// Route deleted.
pub const RTM_DELETE: u8 = 0x2;
/// Route changed.
pub const RTM_CHANGE: u8 = 0x3;
/// Route lookup request.
pub const RTM_GET: u8 = 0x4;
/// Kernel suspects a partitioned route.
pub const RTM_LOSING: u8 = 0x5;
/// Route redirected by ICMP.
pub const RTM_REDIRECT: u8 = 0x6;
/// Route lookup miss.
pub const RTM_MISS: u8 = 0x7;
/// Route metrics locked.
pub const RTM_LOCK: u8 = 0x8;
/// Link-layer address resolution request.
pub const RTM_RESOLVE: u8 = 0xb;
/// Address added to an interface.
pub const RTM_NEWADDR: u8 = 0xc;
/// Address removed from an interface.
pub const RTM_DELADDR: u8 = 0xd;
/// Interface state changed.
pub const RTM_IFINFO: u8 = 0xe;
/// Multicast group membership added.
pub const RTM_NEWMADDR: u8 = 0xf;
/// Multicast group membership removed.
pub const RTM_DELMADDR: u8 = 0x10;

/// Destination address slot.
pub const RTAX_DST: usize = 0;
/// Gateway address slot.
pub const RTAX_GATEWAY: usize = 1;
/// Netmask slot.
pub const RTAX_NETMASK: usize = 2;
pub const RTAX_GENMASK: usize = 3;
/// Interface name slot.
pub const RTAX_IFP: usize = 4;
/// Interface address slot; the only slot surfaced as a fact.
pub const RTAX_IFA: usize = 5;
pub const RTAX_AUTHOR: usize = 6;
/// Broadcast address slot.
pub const RTAX_BRD: usize = 7;
/// Number of address slots in the presence bitmask.
pub const RTAX_MAX: usize = 8;

pub const AF_INET: u8 = 2;

// AF_INET6 differs per BSD flavor. The darwin value doubles as the
// fallback so the decode path builds and tests on any host.
#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
pub const AF_INET6: u8 = 28;
#[cfg(any(target_os = "openbsd", target_os = "netbsd"))]
pub const AF_INET6: u8 = 24;
#[cfg(not(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd",
    target_os = "netbsd"
)))]
pub const AF_INET6: u8 = 30;

/// Interface is administratively up.
pub const IFF_UP: i32 = 0x1;

/// Sub-records start on 4-byte boundaries.
pub const SA_ALIGN: usize = 4;

/// Rounds `len` up to the next multiple of `align` (a power of two).
#[inline]
pub const fn roundup(len: usize, align: usize) -> usize {
    (len + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn roundup_steps_to_the_next_boundary() {
        assert_eq!(roundup(0, 4), 0);
        assert_eq!(roundup(1, 4), 4);
        assert_eq!(roundup(4, 4), 4);
        assert_eq!(roundup(5, 4), 8);
        assert_eq!(roundup(16, 4), 16);
        assert_eq!(roundup(26, 4), 28);
    }

    proptest! {
        #[test]
        fn roundup_is_aligned_monotone_and_idempotent(len in 0usize..100_000) {
            let r = roundup(len, SA_ALIGN);
            prop_assert_eq!(r % SA_ALIGN, 0);
            prop_assert!(r >= len);
            prop_assert_eq!(roundup(r, SA_ALIGN), r);
        }
    }
}

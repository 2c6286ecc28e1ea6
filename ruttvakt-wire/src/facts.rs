//! Structured facts produced by the dispatcher.

use std::fmt;
use std::net::IpAddr;

use crate::sockaddr::AddressFamily;

/// Whether an address-change event added or removed the address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressAction {
    Added,
    Removed,
}

impl AddressAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for AddressAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded observation about interface or address state.
#[derive(Clone, Debug, PartialEq)]
pub enum Fact {
    /// An interface changed state.
    InterfaceState {
        index: u16,
        /// OS-assigned name; `None` when the lookup service has no entry
        /// for the index (the interface may already be gone).
        name: Option<String>,
        flags: i32,
        up: bool,
    },

    /// An address appeared on or disappeared from an interface.
    AddressChange {
        index: u16,
        name: Option<String>,
        family: AddressFamily,
        action: AddressAction,
        addr: IpAddr,
    },

    /// A message type this observer does not understand. Diagnostic, not
    /// an error: newer kernels ship new types.
    UnhandledType { msg_type: u8 },
}

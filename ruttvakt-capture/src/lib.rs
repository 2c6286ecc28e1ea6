//! # ruttvakt-capture
//!
//! Ownership of the kernel routing-notification endpoint: the raw socket,
//! the blocking read loop that feeds the event bus, and the OS-backed
//! interface-name lookup.

pub mod read_loop;
pub mod resolver;
pub mod socket;

pub use resolver::SystemInterfaceResolver;
pub use socket::RouteSocket;

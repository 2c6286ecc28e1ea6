//! Event types and the bounded event bus.

pub mod bus;
pub mod raw;

pub use bus::{EventBus, EventError};
pub use raw::RawEvent;

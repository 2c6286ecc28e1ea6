//! # ruttvakt-core
//!
//! Foundation layer for the route monitor: the raw kernel event type and
//! the bounded hand-off queue between the capture loop and decode workers.

pub mod events;

pub mod prelude {
    pub use crate::events::*;
}

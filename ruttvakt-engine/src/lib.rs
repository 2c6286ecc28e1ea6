//! # ruttvakt-engine
//!
//! Runtime coordination for the route monitor: the capture loop, the
//! decode worker pool, fact reporting, and coordinated shutdown. The
//! same implementation backs every frontend; the CLI is one of them.

pub mod error;
pub mod runtime;
pub mod shutdown;

pub use error::MonitorError;
pub use runtime::{run_decode_mode, MonitorRuntime};
pub use shutdown::{MonitorState, ShutdownController};

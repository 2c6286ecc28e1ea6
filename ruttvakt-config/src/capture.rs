//! Kernel read-loop configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Capture configuration for the routing-socket read loop.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CaptureConfig {
    /// Scratch buffer size for one kernel datagram, in bytes. Routing
    /// messages are small; the default leaves generous headroom.
    #[serde(default = "default_read_buffer_size")]
    #[validate(range(min = 512, max = 65536))]
    pub read_buffer_size: usize,
}

fn default_read_buffer_size() -> usize {
    2048
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

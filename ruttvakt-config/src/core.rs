//! Core system configuration: event bus sizing and the worker pool.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Core system configuration parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CoreConfig {
    /// Event bus configuration.
    #[validate(nested)]
    pub event_bus: EventBusConfig,

    /// Number of decode workers draining the bus.
    #[serde(default = "default_workers")]
    #[validate(range(min = 1, max = 64))]
    pub workers: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            event_bus: EventBusConfig::default(),
            workers: default_workers(),
        }
    }
}

/// Bounded event bus configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct EventBusConfig {
    /// Capacity of the event bus; events past it are dropped.
    #[serde(default = "default_capacity")]
    #[validate(range(min = 16, max = 65536))]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    256
}

fn default_workers() -> usize {
    // Decoding is cheap; a few workers keep up with any realistic burst.
    num_cpus::get().min(4)
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

//! Coordinated teardown of the capture loop and worker pool.
//!
//! Stop sequence: set the expected-stop flag, close the socket (the
//! blocked reader fails out), close the bus (workers drain what is
//! queued, then see the end and exit). The runtime joins every worker
//! before marking the coordinator stopped.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tracing::info;

use ruttvakt_capture::RouteSocket;
use ruttvakt_core::events::EventBus;

/// Lifecycle states of the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MonitorState {
    Running = 0,
    Stopping = 1,
    Stopped = 2,
}

/// Owns the stop transition for the socket/bus pair.
pub struct ShutdownController {
    state: AtomicU8,
    stopping: Arc<AtomicBool>,
    socket: Arc<RouteSocket>,
    bus: Arc<EventBus>,
}

impl ShutdownController {
    pub fn new(socket: Arc<RouteSocket>, bus: Arc<EventBus>) -> Self {
        Self {
            state: AtomicU8::new(MonitorState::Running as u8),
            stopping: Arc::new(AtomicBool::new(false)),
            socket,
            bus,
        }
    }

    /// The expected-stop flag shared with the read loop, which uses it
    /// to tell a shutdown-induced read failure from a device error.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stopping)
    }

    pub fn state(&self) -> MonitorState {
        match self.state.load(Ordering::Acquire) {
            0 => MonitorState::Running,
            1 => MonitorState::Stopping,
            _ => MonitorState::Stopped,
        }
    }

    /// Begins the stop sequence. Only the first call acts; any later
    /// trigger (second signal, reader death racing the signal path) is a
    /// no-op.
    pub fn trigger(&self) {
        if self
            .state
            .compare_exchange(
                MonitorState::Running as u8,
                MonitorState::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }
        info!("shutdown initiated");
        self.stopping.store(true, Ordering::Release);
        self.socket.close();
        self.bus.close();
    }

    /// Final transition once every worker has exited. Closes the socket
    /// and bus again; both closes are idempotent, so this is safe even
    /// when the trigger path already ran.
    pub fn finish(&self) {
        self.socket.close();
        self.bus.close();
        self.state
            .store(MonitorState::Stopped as u8, Ordering::Release);
        info!("shutdown complete");
    }
}

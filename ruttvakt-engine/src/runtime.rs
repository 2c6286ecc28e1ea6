//! Monitor runtime: the capture loop, the worker pool, and fact
//! reporting.

use std::future::Future;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use opentelemetry::KeyValue;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, info, instrument, warn};

use ruttvakt_capture::{read_loop, RouteSocket, SystemInterfaceResolver};
use ruttvakt_config::RuttvaktConfig;
use ruttvakt_core::events::{EventBus, EventError, RawEvent};
use ruttvakt_telemetry::{EventLogger, MetricsRecorder};
use ruttvakt_wire::{Fact, InterfaceResolver, MessageDispatcher};

use crate::error::MonitorError;
use crate::shutdown::ShutdownController;

/// Coordinates the monitor: one blocking reader feeding the bus, a
/// fixed pool of decode workers draining it.
pub struct MonitorRuntime<R = SystemInterfaceResolver> {
    config: RuttvaktConfig,
    metrics: MetricsRecorder,
    resolver: R,
}

impl MonitorRuntime<SystemInterfaceResolver> {
    pub fn new(config: RuttvaktConfig, metrics: MetricsRecorder) -> Self {
        Self::with_resolver(config, metrics, SystemInterfaceResolver)
    }
}

impl<R> MonitorRuntime<R>
where
    R: InterfaceResolver + Clone + Send + Sync + 'static,
{
    pub fn with_resolver(config: RuttvaktConfig, metrics: MetricsRecorder, resolver: R) -> Self {
        Self {
            config,
            metrics,
            resolver,
        }
    }

    /// Runs until the process receives SIGINT or SIGTERM.
    pub async fn run(self) -> Result<(), MonitorError> {
        self.run_until(shutdown_signal()).await
    }

    /// Runs until `stop` resolves. Split out from [`run`](Self::run) so
    /// callers can drive the lifecycle without delivering a process
    /// signal.
    #[instrument(skip_all)]
    pub async fn run_until<F>(self, stop: F) -> Result<(), MonitorError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket = Arc::new(RouteSocket::open().map_err(MonitorError::Setup)?);
        let bus = Arc::new(EventBus::with_capacity(self.config.core.event_bus.capacity));
        let shutdown = Arc::new(ShutdownController::new(
            Arc::clone(&socket),
            Arc::clone(&bus),
        ));

        info!(
            workers = self.config.core.workers,
            capacity = self.config.core.event_bus.capacity,
            "starting route monitor"
        );
        EventLogger::log_event(
            "monitor_started",
            vec![KeyValue::new("workers", self.config.core.workers as i64)],
        )
        .await;

        let dispatcher = Arc::new(MessageDispatcher::new(self.resolver.clone()));
        let workers: Vec<JoinHandle<()>> = (0..self.config.core.workers)
            .map(|id| {
                let bus = Arc::clone(&bus);
                let dispatcher = Arc::clone(&dispatcher);
                let metrics = self.metrics.clone();
                spawn_blocking(move || worker_loop(id, &bus, &dispatcher, &metrics))
            })
            .collect();

        let reader = spawn_read_loop(
            Arc::clone(&socket),
            Arc::clone(&bus),
            shutdown.stop_flag(),
            self.config.capture.read_buffer_size,
            self.metrics.clone(),
        );

        // The stop event and the reader's own death both funnel into the
        // same trigger; it acts once.
        let stop_shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            stop.await;
            info!("stop signal received");
            stop_shutdown.trigger();
        });

        reader.await?;
        shutdown.trigger();

        for (id, worker) in workers.into_iter().enumerate() {
            worker.await?;
            debug!(worker = id, "worker joined");
        }
        shutdown.finish();

        EventLogger::log_event(
            "monitor_stopped",
            vec![KeyValue::new(
                "processed",
                self.metrics.processed_events.get() as i64,
            )],
        )
        .await;
        Ok(())
    }
}

/// Spawns the blocking read loop. Each datagram is copied out of the
/// scratch buffer into a fresh event before the hand-off; a full queue
/// drops the event and records the drop.
fn spawn_read_loop(
    socket: Arc<RouteSocket>,
    bus: Arc<EventBus>,
    stopping: Arc<AtomicBool>,
    read_buffer_size: usize,
    metrics: MetricsRecorder,
) -> JoinHandle<()> {
    spawn_blocking(move || {
        read_loop::run(&socket, read_buffer_size, &stopping, |datagram| {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("Time went backwards")
                .as_nanos() as u64;
            match bus.try_send(RawEvent::from_slice(timestamp, datagram)) {
                Ok(()) => {}
                Err(EventError::QueueFull) => {
                    metrics.inc_dropped_events();
                    warn!("event queue full, message dropped");
                }
                Err(EventError::Closed) => {}
            }
        });
    })
}

/// Drains the bus until it is closed and empty.
fn worker_loop<R: InterfaceResolver>(
    id: usize,
    bus: &EventBus,
    dispatcher: &MessageDispatcher<R>,
    metrics: &MetricsRecorder,
) {
    debug!(worker = id, "worker started");
    while let Some(event) = bus.recv() {
        let start = Instant::now();
        let facts = dispatcher.dispatch(&event.payload);
        metrics
            .decode_latency
            .observe(start.elapsed().as_nanos() as f64);
        metrics.inc_processed_events();
        for fact in &facts {
            report_fact(fact);
        }
    }
    debug!(worker = id, "worker exiting, queue closed and drained");
}

/// Emits one fact to the log stream.
fn report_fact(fact: &Fact) {
    match fact {
        Fact::InterfaceState {
            index,
            name,
            flags,
            up,
        } => {
            info!(
                index = *index,
                name = name.as_deref().unwrap_or("?"),
                flags = *flags,
                status = if *up { "UP" } else { "DOWN" },
                "interface state changed"
            );
        }
        Fact::AddressChange {
            index,
            name,
            family,
            action,
            addr,
        } => {
            info!(
                index = *index,
                name = name.as_deref().unwrap_or("?"),
                family = family.name(),
                action = action.as_str(),
                addr = %addr,
                "interface address changed"
            );
        }
        Fact::UnhandledType { msg_type } => {
            debug!(msg_type = *msg_type, "unhandled routing message type");
        }
    }
}

/// Offline mode: decodes hex-encoded datagrams from a trace file, one
/// per line, through the same dispatcher the live path uses. Blank lines
/// and `#` comments are skipped.
#[instrument(skip(metrics))]
pub async fn run_decode_mode<P: AsRef<Path> + std::fmt::Debug>(
    path: P,
    metrics: MetricsRecorder,
) -> Result<(), MonitorError> {
    let text = std::fs::read_to_string(path)?;
    let dispatcher = MessageDispatcher::new(SystemInterfaceResolver);

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let data = match hex::decode(line) {
            Ok(data) => data,
            Err(err) => {
                warn!(line = lineno + 1, error = %err, "skipping undecodable trace line");
                continue;
            }
        };
        metrics.inc_processed_events();
        for fact in &dispatcher.dispatch(&data) {
            report_fact(fact);
        }
    }
    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

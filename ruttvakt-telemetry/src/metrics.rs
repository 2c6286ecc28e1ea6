//! Prometheus metrics for the ingestion pipeline.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub processed_events: prometheus::Counter,
    pub dropped_events: prometheus::Counter,
    pub decode_latency: prometheus::Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let processed_events =
            Counter::new("ruttvakt_events_total", "Total processed routing events").unwrap();
        let dropped_events = Counter::new(
            "ruttvakt_events_dropped_total",
            "Routing events dropped because the queue was full",
        )
        .unwrap();

        let decode_latency = Histogram::with_opts(
            HistogramOpts::new("ruttvakt_decode_latency_ns", "Datagram decode time")
                .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .unwrap();

        registry
            .register(Box::new(processed_events.clone()))
            .unwrap();
        registry.register(Box::new(dropped_events.clone())).unwrap();
        registry.register(Box::new(decode_latency.clone())).unwrap();

        Self {
            registry,
            processed_events,
            dropped_events,
            decode_latency,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    pub fn inc_processed_events(&self) {
        self.processed_events.inc();
    }

    pub fn inc_dropped_events(&self) {
        self.dropped_events.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_gathered_output() {
        let metrics = MetricsRecorder::new();
        metrics.inc_processed_events();
        metrics.inc_dropped_events();
        let output = metrics.gather_metrics().unwrap();
        assert!(output.contains("ruttvakt_events_total"));
        assert!(output.contains("ruttvakt_events_dropped_total"));
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Clone, Default)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    elements_in: AtomicU64,
    snapshots_out: AtomicU64,
    floor_raises: AtomicU64,
    retained_peak: AtomicU64,
}

impl MetricsRegistry {
    pub fn inc_elements_in(&self, delta: u64) {
        self.inner.elements_in.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_snapshots_out(&self, delta: u64) {
        self.inner.snapshots_out.fetch_add(delta, Ordering::Relaxed);
    }

    /// Count a strict increase of the retained minimum after warm-up.
    pub fn inc_floor_raises(&self, delta: u64) {
        self.inner.floor_raises.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn record_retained_peak(&self, retained: u64) {
        self.inner
            .retained_peak
            .fetch_max(retained, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            elements_in: self.inner.elements_in.load(Ordering::Relaxed),
            snapshots_out: self.inner.snapshots_out.load(Ordering::Relaxed),
            floor_raises: self.inner.floor_raises.load(Ordering::Relaxed),
            retained_peak: self.inner.retained_peak.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub elements_in: u64,
    pub snapshots_out: u64,
    pub floor_raises: u64,
    pub retained_peak: u64,
}

impl MetricsSnapshot {
    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            label: &'a str,
            elements_in: u64,
            snapshots_out: u64,
            floor_raises: u64,
            retained_peak: u64,
            elapsed_ms: Option<u128>,
        }

        let payload = Line {
            label,
            elements_in: self.elements_in,
            snapshots_out: self.snapshots_out,
            floor_raises: self.floor_raises,
            retained_peak: self.retained_peak,
            elapsed_ms: elapsed.map(|d| d.as_millis()),
        };
        serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct EpochTimer {
    start: Instant,
}

impl EpochTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

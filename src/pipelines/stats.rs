use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Statistics for sentiment inference: a single call, a batch run, or a pipeline's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Total time spent in inference.
    pub total_time: Duration,
    /// Number of texts analyzed.
    pub items_processed: usize,
}

impl PipelineStats {
    /// Create a new stats tracker (call at start of operation).
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
        }
    }

    /// Average time per analyzed text, or zero if nothing was analyzed.
    pub fn mean_time(&self) -> Duration {
        match u32::try_from(self.items_processed) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_time / n,
            Err(_) => Duration::from_secs_f64(
                self.total_time.as_secs_f64() / self.items_processed as f64,
            ),
        }
    }
}

/// Builder for PipelineStats - tracks timing from creation to finish.
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
}

impl PipelineStatsBuilder {
    /// Time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Finalize stats with the number of items processed.
    pub fn finish(self, items_processed: usize) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            items_processed,
        }
    }
}

// ============ Lifetime counters ============

/// Running totals for one pipeline. Updated through atomics so `analyze` can take `&self`.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    items: AtomicUsize,
    nanos: AtomicU64,
}

impl StatsCounters {
    pub fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.items.fetch_add(1, Ordering::Relaxed);
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            total_time: Duration::from_nanos(self.nanos.load(Ordering::Relaxed)),
            items_processed: self.items.load(Ordering::Relaxed),
        }
    }
}

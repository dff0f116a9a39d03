//! Decision metrics for access control observability

use crate::decision::Decision;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Access control counters and latency summary
#[derive(Debug, Clone, Default)]
pub struct AclMetrics {
    /// Total number of decisions returned
    pub total_decisions: u64,

    /// Decisions permitting access unconditionally
    pub permitted_decisions: u64,

    /// Decisions permitting access under conditions
    pub conditional_decisions: u64,

    /// Decisions denying access
    pub denied_decisions: u64,

    /// Completed context populations
    pub populations: u64,

    /// Population or evaluation calls aborted by an assessor error
    pub assessor_failures: u64,

    /// Population or evaluation calls aborted by a timeout
    pub timeouts: u64,

    /// Evaluation latency
    pub avg_latency_ms: f64,
    pub latency_p50_ms: f64,
    pub latency_p99_ms: f64,
}

impl AclMetrics {
    /// Share of decisions that granted access, conditionally or not
    pub fn permit_rate(&self) -> f64 {
        if self.total_decisions == 0 {
            0.0
        } else {
            (self.permitted_decisions + self.conditional_decisions) as f64
                / self.total_decisions as f64
        }
    }
}

/// Collects [`AclMetrics`] for an [`AccessControl`](crate::AccessControl)
pub struct MetricsCollector {
    metrics: Arc<RwLock<AclMetrics>>,

    /// Latency samples for percentile calculation
    latency_samples: Arc<RwLock<Vec<f64>>>,

    max_samples: usize,
}

impl MetricsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(AclMetrics::default())),
            latency_samples: Arc::new(RwLock::new(Vec::with_capacity(1_000))),
            max_samples: 10_000,
        }
    }

    /// Record a returned decision
    pub async fn record_decision(&self, decision: &Decision) {
        let mut metrics = self.metrics.write().await;
        metrics.total_decisions += 1;

        match decision {
            Decision::Denied => metrics.denied_decisions += 1,
            Decision::Permitted => metrics.permitted_decisions += 1,
            Decision::Conditional(_) => metrics.conditional_decisions += 1,
        }
    }

    /// Record a completed context population
    pub async fn record_population(&self) {
        self.metrics.write().await.populations += 1;
    }

    /// Record an assessor failure
    pub async fn record_failure(&self) {
        self.metrics.write().await.assessor_failures += 1;
    }

    /// Record a timeout
    pub async fn record_timeout(&self) {
        self.metrics.write().await.timeouts += 1;
    }

    /// Record evaluation latency
    pub async fn record_latency(&self, latency: Duration) {
        let latency_ms = latency.as_secs_f64() * 1000.0;

        let mut samples = self.latency_samples.write().await;
        samples.push(latency_ms);
        if samples.len() > self.max_samples {
            let excess = samples.len() - self.max_samples;
            samples.drain(0..excess);
        }

        let mut sorted = samples.clone();
        sorted.sort_by(f64::total_cmp);

        let mut metrics = self.metrics.write().await;
        metrics.avg_latency_ms = sorted.iter().sum::<f64>() / sorted.len() as f64;
        metrics.latency_p50_ms = Self::percentile(&sorted, 0.50);
        metrics.latency_p99_ms = Self::percentile(&sorted, 0.99);
    }

    /// Current metrics snapshot
    pub async fn get_metrics(&self) -> AclMetrics {
        self.metrics.read().await.clone()
    }

    /// Reset all metrics
    pub async fn reset(&self) {
        *self.metrics.write().await = AclMetrics::default();
        self.latency_samples.write().await.clear();
    }

    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let index = ((sorted.len() as f64 * p).ceil() as usize).saturating_sub(1);
        sorted[index.min(sorted.len() - 1)]
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

//! Health evaluation for entity pools

use crate::metrics::PoolStats;

/// Health assessment derived from a statistics snapshot.
///
/// # Examples
///
/// ```
/// use dynapool::{HealthStatus, PoolStats};
///
/// let stats = PoolStats {
///     active: 1,
///     inactive: 2,
///     capacity: 3,
///     utilization: 1.0 / 3.0,
///     ..Default::default()
/// };
///
/// let health = HealthStatus::evaluate(&stats, false);
/// assert!(health.is_healthy());
/// ```
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the pool can be expected to satisfy the next acquire.
    pub is_healthy: bool,

    /// Active share of capacity, 0.0 to 1.0.
    pub utilization: f64,

    /// Currently parked entities.
    pub inactive: usize,

    /// Currently held entities.
    pub active: usize,

    /// Current slot count.
    pub capacity: usize,

    /// Human-readable warning messages.
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Evaluate pool health from a snapshot.
    ///
    /// An exhausted pool is only unhealthy when it cannot recover on its
    /// own, i.e. auto-expansion is disabled.
    pub fn evaluate(stats: &PoolStats, auto_expand: bool) -> Self {
        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if stats.capacity == 0 {
            warnings.push("Pool has no entities - was it initialized?".to_string());
            is_healthy = false;
        } else if stats.inactive == 0 {
            if auto_expand {
                warnings.push("Pool is exhausted; next acquire will expand".to_string());
            } else {
                warnings.push("Pool is exhausted and auto-expansion is disabled".to_string());
                is_healthy = false;
            }
        }

        if stats.utilization > 0.9 && stats.inactive > 0 {
            warnings.push(format!(
                "High utilization: {:.1}%",
                stats.utilization * 100.0
            ));
        }

        Self {
            is_healthy,
            utilization: stats.utilization,
            inactive: stats.inactive,
            active: stats.active,
            capacity: stats.capacity,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}

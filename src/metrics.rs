//! Usage statistics collection and export for entity pools

use std::collections::HashMap;

/// Read-only statistics snapshot for a pool.
///
/// `inactive` is derived from the slot count and the active count at
/// snapshot time; it is never tracked as an independent counter, so it
/// cannot drift.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Entities constructed over the pool's lifetime.
    pub total_created: usize,

    /// Entities currently held by callers.
    pub active: usize,

    /// Entities currently parked and reusable.
    pub inactive: usize,

    /// Acquire calls, counted at request time, including ones that failed.
    pub total_acquire_requests: usize,

    /// Releases performed, explicit or implicit.
    pub total_release_requests: usize,

    /// Pool expansions, during initialization or on-demand.
    pub total_expansions: usize,

    /// High-water mark of the active count. Monotonic.
    pub peak_active: usize,

    /// Current slot count.
    pub capacity: usize,

    /// Active share of capacity, 0.0 to 1.0.
    pub utilization: f64,
}

impl PoolStats {
    /// Export the snapshot as string key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynapool::PoolStats;
    ///
    /// let stats = PoolStats {
    ///     total_created: 4,
    ///     active: 1,
    ///     inactive: 3,
    ///     capacity: 4,
    ///     utilization: 0.25,
    ///     ..Default::default()
    /// };
    ///
    /// let exported = stats.export();
    /// assert_eq!(exported["total_created"], "4");
    /// assert_eq!(exported["utilization"], "0.25");
    /// ```
    pub fn export(&self) -> HashMap<String, String> {
        let mut out = HashMap::new();
        out.insert("total_created".to_string(), self.total_created.to_string());
        out.insert("active".to_string(), self.active.to_string());
        out.insert("inactive".to_string(), self.inactive.to_string());
        out.insert(
            "total_acquire_requests".to_string(),
            self.total_acquire_requests.to_string(),
        );
        out.insert(
            "total_release_requests".to_string(),
            self.total_release_requests.to_string(),
        );
        out.insert(
            "total_expansions".to_string(),
            self.total_expansions.to_string(),
        );
        out.insert("peak_active".to_string(), self.peak_active.to_string());
        out.insert("capacity".to_string(), self.capacity.to_string());
        out.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        out
    }
}

/// Statistics exporter for Prometheus format
pub struct StatsExporter;

impl StatsExporter {
    /// Export a snapshot in Prometheus exposition format.
    pub fn export_prometheus(
        stats: &PoolStats,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        // Gauge metrics
        output.push_str("# HELP entitypool_entities_active Currently active entities\n");
        output.push_str("# TYPE entitypool_entities_active gauge\n");
        output.push_str(&format!(
            "entitypool_entities_active{{{}}} {}\n",
            labels, stats.active
        ));

        output.push_str("# HELP entitypool_entities_inactive Currently parked entities\n");
        output.push_str("# TYPE entitypool_entities_inactive gauge\n");
        output.push_str(&format!(
            "entitypool_entities_inactive{{{}}} {}\n",
            labels, stats.inactive
        ));

        output.push_str("# HELP entitypool_utilization Active share of pool capacity\n");
        output.push_str("# TYPE entitypool_utilization gauge\n");
        output.push_str(&format!(
            "entitypool_utilization{{{}}} {:.2}\n",
            labels, stats.utilization
        ));

        output.push_str("# HELP entitypool_peak_active High-water mark of active entities\n");
        output.push_str("# TYPE entitypool_peak_active gauge\n");
        output.push_str(&format!(
            "entitypool_peak_active{{{}}} {}\n",
            labels, stats.peak_active
        ));

        // Counter metrics
        output.push_str("# HELP entitypool_created_total Entities constructed\n");
        output.push_str("# TYPE entitypool_created_total counter\n");
        output.push_str(&format!(
            "entitypool_created_total{{{}}} {}\n",
            labels, stats.total_created
        ));

        output.push_str("# HELP entitypool_acquire_requests_total Acquire requests\n");
        output.push_str("# TYPE entitypool_acquire_requests_total counter\n");
        output.push_str(&format!(
            "entitypool_acquire_requests_total{{{}}} {}\n",
            labels, stats.total_acquire_requests
        ));

        output.push_str("# HELP entitypool_release_requests_total Releases performed\n");
        output.push_str("# TYPE entitypool_release_requests_total counter\n");
        output.push_str(&format!(
            "entitypool_release_requests_total{{{}}} {}\n",
            labels, stats.total_release_requests
        ));

        output.push_str("# HELP entitypool_expansions_total Pool expansions\n");
        output.push_str("# TYPE entitypool_expansions_total counter\n");
        output.push_str(&format!(
            "entitypool_expansions_total{{{}}} {}\n",
            labels, stats.total_expansions
        ));

        output
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Running counters, mutated only on the authoritative context.
///
/// Plain fields, not atomics: every mutation happens behind `&mut` on the
/// single-writer pool.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StatCounters {
    pub total_created: usize,
    pub active: usize,
    pub total_acquire_requests: usize,
    pub total_release_requests: usize,
    pub total_expansions: usize,
    pub peak_active: usize,
}

impl StatCounters {
    /// Snapshot against the current slot count.
    pub fn snapshot(&self, capacity: usize) -> PoolStats {
        let utilization = if capacity > 0 {
            self.active as f64 / capacity as f64
        } else {
            0.0
        };

        PoolStats {
            total_created: self.total_created,
            active: self.active,
            inactive: capacity - self.active,
            total_acquire_requests: self.total_acquire_requests,
            total_release_requests: self.total_release_requests,
            total_expansions: self.total_expansions,
            peak_active: self.peak_active,
            capacity,
            utilization,
        }
    }
}

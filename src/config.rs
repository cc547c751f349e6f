//! Pool configuration options

use crate::lifespan::LifespanPolicy;
use std::time::Duration;

/// Configuration for entity pool behavior
///
/// # Examples
///
/// ```
/// use dynapool::{LifespanPolicy, PoolConfig};
/// use std::time::Duration;
///
/// let config = PoolConfig::new()
///     .with_auto_expand(true)
///     .with_timer_return(Duration::from_secs(5));
///
/// assert!(config.auto_expand);
/// assert_eq!(
///     config.lifespan,
///     LifespanPolicy::TimerReturn(Duration::from_secs(5))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Whether this pool instance holds authority (the single-writer role).
    /// Mutating calls on a non-authoritative pool are no-ops, so a
    /// read-only mirror can share code with the authoritative owner.
    pub authoritative: bool,

    /// If true, an acquire with no inactive entity expands the pool by one
    /// instead of failing.
    pub auto_expand: bool,

    /// What happens when a spawned entity outlives its configured lifespan.
    pub lifespan: LifespanPolicy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            authoritative: true,
            auto_expand: false,
            lifespan: LifespanPolicy::None,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark this pool instance as a non-authoritative observer.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynapool::PoolConfig;
    ///
    /// let config = PoolConfig::new().read_only();
    /// assert!(!config.authoritative);
    /// ```
    pub fn read_only(mut self) -> Self {
        self.authoritative = false;
        self
    }

    /// Enable or disable auto-expansion on exhausted acquire
    pub fn with_auto_expand(mut self, enabled: bool) -> Self {
        self.auto_expand = enabled;
        self
    }

    /// Use the self-destruct lifespan policy: entities that outlive
    /// `lifespan` are destroyed and their slots removed.
    pub fn with_self_destruct(mut self, lifespan: Duration) -> Self {
        self.lifespan = LifespanPolicy::SelfDestruct(lifespan);
        self
    }

    /// Use the timer-return lifespan policy: entities that outlive
    /// `lifespan` are released back to the pool.
    pub fn with_timer_return(mut self, lifespan: Duration) -> Self {
        self.lifespan = LifespanPolicy::TimerReturn(lifespan);
        self
    }
}

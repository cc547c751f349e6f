//! Lifespan policies for automatic entity return or destruction

use std::time::{Duration, Instant};

/// What happens to an entity whose configured lifespan elapses while it is
/// still active.
///
/// Exactly one policy is in force per pool. The two timed policies cannot be
/// combined, so a spawned entity is never both destroyed and timer-returned.
///
/// # Examples
///
/// ```
/// use dynapool::LifespanPolicy;
/// use std::time::Duration;
///
/// let policy = LifespanPolicy::TimerReturn(Duration::from_secs(5));
/// assert!(policy.duration().is_some());
/// assert!(LifespanPolicy::None.duration().is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifespanPolicy {
    /// Entities stay active until explicitly released.
    #[default]
    None,

    /// The underlying entity is destroyed outright when the lifespan
    /// elapses. Its pool slot is removed, not recycled; a later `expand`
    /// is needed to replenish capacity.
    SelfDestruct(Duration),

    /// The entity is released back to the pool when the lifespan elapses.
    /// The slot stays reusable. An explicit release cancels the pending
    /// return.
    TimerReturn(Duration),
}

impl LifespanPolicy {
    /// The configured lifespan duration, if any.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            LifespanPolicy::None => None,
            LifespanPolicy::SelfDestruct(d) | LifespanPolicy::TimerReturn(d) => Some(*d),
        }
    }

    /// Deadline to arm on a freshly spawned entity, relative to `now`.
    pub(crate) fn deadline_after(&self, now: Instant) -> Option<Instant> {
        self.duration().map(|d| now + d)
    }
}

/// True when an armed deadline has passed.
pub(crate) fn is_due(deadline: Option<Instant>, now: Instant) -> bool {
    matches!(deadline, Some(at) if now >= at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_deadlines() {
        let now = Instant::now();
        assert_eq!(LifespanPolicy::None.deadline_after(now), None);

        let policy = LifespanPolicy::SelfDestruct(Duration::from_secs(2));
        let deadline = policy.deadline_after(now).unwrap();
        assert!(!is_due(Some(deadline), now));
        assert!(is_due(Some(deadline), now + Duration::from_secs(3)));
    }

    #[test]
    fn test_unarmed_deadline_never_due() {
        assert!(!is_due(None, Instant::now()));
    }
}

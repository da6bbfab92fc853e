use chrono::{DateTime, Utc};

/// Source of "now", sampled once per request.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for deterministic rendering.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whole seconds from `now` until `target`, truncated toward zero and clamped at zero.
pub fn seconds_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let secs = target.signed_duration_since(now).num_seconds();
    u64::try_from(secs).unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/time/remaining.rs"]
mod tests;

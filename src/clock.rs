use chrono::{DateTime, Utc};

/// Source of the current time for message headers and day-boundary
/// calculations. Injected rather than read from a global so callers and
/// tests can pin "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The process wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a preset instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

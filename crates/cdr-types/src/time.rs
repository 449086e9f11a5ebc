//! Time source port.
//!
//! Commit and audit timestamps are server-assigned: components take a
//! `TimeSource` rather than reading the system clock directly, so tests
//! can pin time and so client clocks never leak into the record.

/// Milliseconds since the UNIX epoch.
pub type Timestamp = u64;

/// Clock abstraction for server-assigned timestamps.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Fixed time source for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub Timestamp);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return the current Unix time in
/// milliseconds.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// clock in tests.
///
/// # Example
/// ```
/// use keyflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         42
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 42);
/// ```
pub trait TimeSource {
    /// Returns the number of milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

/// The default [`TimeSource`], backed by [`std::time::SystemTime`].
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as u64
    }
}

impl SystemClock {
    /// Returns the number of whole seconds since the Unix epoch.
    #[must_use]
    pub fn current_seconds(&self) -> u64 {
        self.current_millis() / 1_000
    }
}

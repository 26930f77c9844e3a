use std::sync::OnceLock;
use std::time::Instant;

use crate::time::{SystemClock, TimeSource};

/// A wall-anchored nanosecond time source, the time base of Flakes.
///
/// On first reference the clock samples the wall clock and a monotonic
/// instant exactly once; every subsequent query returns the anchored wall
/// time plus the monotonic time elapsed since the anchor. Wall-clock
/// adjustments after construction (NTP steps, manual changes) therefore never
/// move this clock backward, at the cost of drifting relative to corrected
/// wall time over long process lifetimes. The anchor is never refreshed.
///
/// Within a single thread the returned values are strictly monotonic when the
/// underlying [`Instant`] source is.
#[derive(Debug)]
pub struct NanoClock {
    wall_start_ns: u64,
    mono_start: Instant,
}

impl NanoClock {
    /// Anchors a new clock to the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wall_start_ns: SystemClock.current_millis() * 1_000_000,
            mono_start: Instant::now(),
        }
    }

    /// Returns nanoseconds since the Unix epoch, per the anchor.
    #[must_use]
    pub fn now_ns(&self) -> u64 {
        self.wall_start_ns + self.mono_start.elapsed().as_nanos() as u64
    }
}

impl Default for NanoClock {
    fn default() -> Self {
        Self::new()
    }
}

static NANO: OnceLock<NanoClock> = OnceLock::new();

/// Returns nanoseconds since the Unix epoch from the process-wide
/// [`NanoClock`], anchoring it on first use.
#[must_use]
pub fn nanotime() -> u64 {
    NANO.get_or_init(NanoClock::new).now_ns()
}

use core::cmp;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::rand::{RandSource, ThreadRandom};
use crate::time::{SystemClock, TimeSource};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Highest value of the 12-bit sub-millisecond counter.
const MAX_COUNTER: u64 = 0xFFF;

const COUNTER_BITS: u32 = 12;
const COUNTER_MASK: u64 = (1 << COUNTER_BITS) - 1;

const fn pack(millis: u64, counter: u64) -> u64 {
    (millis << COUNTER_BITS) | counter
}

const fn unpack(state: u64) -> (u64, u64) {
    (state >> COUNTER_BITS, state & COUNTER_MASK)
}

/// A lock-free, strictly monotonic source of `(unix_millis, counter)` pairs,
/// the time base of UUID v7.
///
/// Shares the CAS structure of [`GregorianClock`]: the pair is packed into a
/// single [`AtomicU64`] with the milliseconds in the high bits, and every
/// successful update strictly increases it. Two differences:
///
/// - On a new millisecond the counter is reseeded with a random 8-bit value
///   rather than zero, salting concurrently started processes apart.
/// - The counter caps at `0xFFF`, the width of the 12-bit field below the v7
///   version nibble.
///
/// [`GregorianClock`]: crate::GregorianClock
pub struct UnixClock<T = SystemClock, R = ThreadRandom> {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    time: T,
    rng: R,
}

impl<T, R> UnixClock<T, R>
where
    T: TimeSource,
    R: RandSource<u8>,
{
    /// Creates a clock over the given [`TimeSource`] and [`RandSource`],
    /// starting from a zero state.
    pub const fn with_parts(time: T, rng: R) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(0),
            time,
            rng,
        }
    }

    /// Returns the next strictly increasing `(unix_millis, counter)` pair.
    ///
    /// Spins while the wall clock is behind the last issued millisecond or the
    /// counter is exhausted.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn millis_and_counter(&self) -> (u64, u64) {
        loop {
            if let Some(pair) = self.poll() {
                return pair;
            }
            core::hint::spin_loop();
        }
    }

    /// Attempts one compare-and-swap advance of the clock cell.
    fn poll(&self) -> Option<(u64, u64)> {
        let now = self.time.current_millis();

        let current = self.state.load(Ordering::Relaxed);
        let (current_ms, current_counter) = unpack(current);

        let next = match now.cmp(&current_ms) {
            cmp::Ordering::Greater => pack(now, u64::from(self.rng.rand())),
            cmp::Ordering::Less => return Self::cold_clock_behind(),
            cmp::Ordering::Equal => {
                let counter = current_counter + 1;
                if counter > MAX_COUNTER {
                    return None;
                }
                pack(current_ms, counter)
            }
        };

        self.state
            .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
            .ok()?;

        Some(unpack(next))
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind() -> Option<(u64, u64)> {
        None
    }
}

static UNIX: UnixClock = UnixClock::with_parts(SystemClock, ThreadRandom);

/// Returns the next value of the process-wide Unix clock.
#[must_use]
pub fn unix_millis_and_counter() -> (u64, u64) {
    UNIX.millis_and_counter()
}

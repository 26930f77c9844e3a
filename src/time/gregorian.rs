use core::cmp;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::time::{SystemClock, TimeSource};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// 1582-10-15T00:00:00Z expressed in 100-ns units before 1900-01-01T00:00:00Z.
pub const GREGORIAN_EPOCH_OFFSET_100NS: u64 = 100_103_040_000_000_000;

/// Milliseconds between 1900-01-01T00:00:00Z and the Unix epoch.
pub const UNIX_TO_UT_OFFSET_MS: u64 = 2_208_988_800_000;

/// Number of 100-ns intervals per millisecond.
pub const MS_TO_100NS: u64 = 10_000;

/// Milliseconds between 1582-10-15T00:00:00Z and the Unix epoch.
pub const GREGORIAN_UNIX_OFFSET_MS: u64 = 12_219_292_800_000;

/// Highest sub-millisecond counter value; 10 000 values fill one millisecond
/// exactly in 100-ns units.
const MAX_COUNTER: u64 = 9_999;

/// Bits reserved for the counter in the packed `(millis, counter)` cell.
const COUNTER_BITS: u32 = 14;
const COUNTER_MASK: u64 = (1 << COUNTER_BITS) - 1;

const fn pack(millis: u64, counter: u64) -> u64 {
    (millis << COUNTER_BITS) | counter
}

const fn unpack(state: u64) -> (u64, u64) {
    (state >> COUNTER_BITS, state & COUNTER_MASK)
}

/// A lock-free, strictly monotonic source of 60-bit Gregorian timestamps in
/// 100-ns units since 1582-10-15T00:00:00Z, the time base of UUID v1/v6.
///
/// The clock state is a `(millis, counter)` pair packed into a single
/// [`AtomicU64`] (milliseconds in the high bits so the packed word orders the
/// same way the pair does). Every successful update strictly increases the
/// pair lexicographically, so concurrent callers observe a total order.
///
/// At most 10 000 values are issued per wall-clock millisecond; on exhaustion
/// callers spin until the millisecond advances. Backward wall-clock movement
/// also causes spinning rather than value regression.
pub struct GregorianClock<T = SystemClock> {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    time: T,
}

impl<T> GregorianClock<T>
where
    T: TimeSource,
{
    /// Creates a clock over the given [`TimeSource`], starting from a zero
    /// state (the first call always observes a fresh millisecond).
    pub const fn with_time(time: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(0),
            time,
        }
    }

    /// Returns the next strictly increasing 60-bit Gregorian timestamp.
    ///
    /// Spins while the wall clock is behind the last issued millisecond or the
    /// per-millisecond counter is exhausted; both conditions clear as soon as
    /// the wall clock advances.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn timestamp_100ns(&self) -> u64 {
        loop {
            if let Some(ts) = self.poll() {
                return ts;
            }
            core::hint::spin_loop();
        }
    }

    /// Attempts one compare-and-swap advance of the clock cell.
    ///
    /// Returns `None` when the wall clock has regressed, the counter for the
    /// current millisecond is exhausted, or another thread won the race.
    fn poll(&self) -> Option<u64> {
        let now = self.time.current_millis();

        let current = self.state.load(Ordering::Relaxed);
        let (current_ms, current_counter) = unpack(current);

        let next = match now.cmp(&current_ms) {
            cmp::Ordering::Greater => pack(now, 0),
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

        let (millis, counter) = unpack(next);
        Some(counter + GREGORIAN_EPOCH_OFFSET_100NS + (UNIX_TO_UT_OFFSET_MS + millis) * MS_TO_100NS)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind() -> Option<u64> {
        None
    }
}

static GREGORIAN: GregorianClock = GregorianClock::with_time(SystemClock);

/// Returns the next value of the process-wide Gregorian clock.
#[must_use]
pub fn gregorian_timestamp() -> u64 {
    GREGORIAN.timestamp_100ns()
}

/// Converts a 60-bit Gregorian 100-ns timestamp to Unix milliseconds.
#[must_use]
pub const fn gregorian_to_unix_ms(timestamp: u64) -> u64 {
    timestamp / MS_TO_100NS - GREGORIAN_UNIX_OFFSET_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockTime {
        millis: u64,
    }

    impl TimeSource for MockTime {
        fn current_millis(&self) -> u64 {
            self.millis
        }
    }

    struct StepTime {
        values: Vec<u64>,
        index: Cell<usize>,
    }

    impl TimeSource for StepTime {
        fn current_millis(&self) -> u64 {
            self.values[self.index.get()]
        }
    }

    fn at(millis: u64, counter: u64) -> u64 {
        counter + GREGORIAN_EPOCH_OFFSET_100NS + (UNIX_TO_UT_OFFSET_MS + millis) * MS_TO_100NS
    }

    #[test]
    fn epoch_offsets_agree() {
        // 1582 -> 1900 plus 1900 -> 1970, both in 100-ns units, must equal the
        // full Gregorian-to-Unix distance.
        assert_eq!(
            GREGORIAN_EPOCH_OFFSET_100NS + UNIX_TO_UT_OFFSET_MS * MS_TO_100NS,
            GREGORIAN_UNIX_OFFSET_MS * MS_TO_100NS
        );
        assert_eq!(gregorian_to_unix_ms(at(42, 0)), 42);
    }

    #[test]
    fn counter_increments_within_same_millisecond() {
        let clock = GregorianClock::with_time(MockTime { millis: 42 });
        assert_eq!(clock.timestamp_100ns(), at(42, 0));
        assert_eq!(clock.timestamp_100ns(), at(42, 1));
        assert_eq!(clock.timestamp_100ns(), at(42, 2));
    }

    #[test]
    fn counter_exhausts_at_ten_thousand() {
        let clock = GregorianClock::with_time(MockTime { millis: 7 });
        for counter in 0..=MAX_COUNTER {
            assert_eq!(clock.poll(), Some(at(7, counter)));
        }
        // 10 000 values issued; the millisecond is now dry.
        assert_eq!(clock.poll(), None);
        assert_eq!(clock.poll(), None);
    }

    #[test]
    fn regressed_wall_clock_yields_nothing() {
        let time = StepTime {
            values: vec![100, 99, 101],
            index: Cell::new(0),
        };
        let clock = GregorianClock::with_time(time);
        assert_eq!(clock.poll(), Some(at(100, 0)));

        clock.time.index.set(1);
        assert_eq!(clock.poll(), None);

        clock.time.index.set(2);
        assert_eq!(clock.poll(), Some(at(101, 0)));
    }

    #[test]
    fn new_millisecond_resets_counter() {
        let time = StepTime {
            values: vec![5, 6],
            index: Cell::new(0),
        };
        let clock = GregorianClock::with_time(time);
        assert_eq!(clock.poll(), Some(at(5, 0)));
        assert_eq!(clock.poll(), Some(at(5, 1)));

        clock.time.index.set(1);
        assert_eq!(clock.poll(), Some(at(6, 0)));
    }

    #[test]
    fn process_clock_is_strictly_increasing() {
        let mut last = gregorian_timestamp();
        for _ in 0..50_000 {
            let next = gregorian_timestamp();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn process_clock_unique_across_threads() {
        use std::collections::HashSet;
        use std::sync::Mutex;
        use std::thread::scope;

        const THREADS: usize = 4;
        const PER_THREAD: usize = 10_000;

        let seen = Mutex::new(HashSet::with_capacity(THREADS * PER_THREAD));
        scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    let mut local = Vec::with_capacity(PER_THREAD);
                    for _ in 0..PER_THREAD {
                        local.push(gregorian_timestamp());
                    }
                    let mut set = seen.lock().unwrap();
                    for ts in local {
                        assert!(set.insert(ts));
                    }
                });
            }
        });
        assert_eq!(seen.lock().unwrap().len(), THREADS * PER_THREAD);
    }
}

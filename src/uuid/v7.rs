use crate::bits::{dpb, ldb, mask};
use crate::rand::{RandSource, ThreadRandom};
use crate::time::unix_millis_and_counter;
use crate::uuid::uuid::{Uuid, VARIANT_FIELD, VERSION_FIELD};

impl Uuid {
    /// Generates a version 7 (Unix time-based) UUID.
    ///
    /// The 48-bit millisecond timestamp and 12-bit counter come as one pair
    /// from the process-wide monotonic Unix clock, so v7 values are strictly
    /// monotone per process and sort lexically by generation order. The
    /// least-significant word is 62 bits of fresh entropy under the variant.
    #[must_use]
    pub fn new_v7() -> Self {
        let (millis, counter) = unix_millis_and_counter();
        let hi = ldb(mask(48, 0), millis) << 16 | dpb(VERSION_FIELD, counter, 7);
        let lo = dpb(VARIANT_FIELD, RandSource::<u64>::rand(&ThreadRandom), 0b10);
        Self::from_words(hi, lo)
    }
}

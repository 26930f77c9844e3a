use crate::bits::{dpb, mask};
use crate::time::SystemClock;
use crate::uuid::uuid::Uuid;

impl Uuid {
    /// Generates a sequential random ("SQUUID") identifier: a v4 UUID whose
    /// top 32 bits are replaced with the current POSIX seconds.
    ///
    /// The version nibble and variant bits live below the overlaid field, so
    /// the result still reads as version 4. Values generated in different
    /// seconds sort by time; within a second ordering is random.
    #[must_use]
    pub fn new_squuid() -> Self {
        let (hi, lo) = Self::new_v4().to_words();
        let seconds = SystemClock.current_seconds();
        Self::from_words(dpb(mask(32, 32), hi, seconds), lo)
    }
}

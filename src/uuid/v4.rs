use crate::bits::dpb;
use crate::rand::{RandSource, ThreadRandom};
use crate::uuid::uuid::{Uuid, VARIANT_FIELD, VERSION_FIELD};

impl Uuid {
    /// Generates a version 4 (random) UUID from the thread-local CSPRNG.
    #[must_use]
    pub fn new_v4() -> Self {
        let rng = ThreadRandom;
        Self::new_v4_from_words(
            RandSource::<u64>::rand(&rng),
            RandSource::<u64>::rand(&rng),
        )
    }

    /// Builds a version 4 UUID from caller-supplied words, overwriting only
    /// the version nibble and variant bits.
    #[must_use]
    pub const fn new_v4_from_words(hi: u64, lo: u64) -> Self {
        Self::from_words(
            dpb(VERSION_FIELD, hi, 4),
            dpb(VARIANT_FIELD, lo, 0b10),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn version_and_variant_bits() {
        let id = Uuid::new_v4();
        assert_eq!(id.version(), 4);
        assert_eq!(id.variant(), 0b10);
    }

    #[test]
    fn explicit_words_only_lose_version_and_variant() {
        assert_eq!(
            Uuid::new_v4_from_words(0, 0).to_string(),
            "00000000-0000-4000-8000-000000000000"
        );
        assert_eq!(
            Uuid::new_v4_from_words(u64::MAX, u64::MAX).to_string(),
            "ffffffff-ffff-4fff-bfff-ffffffffffff"
        );
    }

    #[test]
    fn no_collisions_over_many_draws() {
        let ids: HashSet<Uuid> = (0..100_000).map(|_| Uuid::new_v4()).collect();
        assert_eq!(ids.len(), 100_000);
    }

    #[test]
    fn carries_no_timestamp() {
        assert_eq!(Uuid::new_v4().timestamp(), None);
        assert_eq!(Uuid::new_v4().clock_sequence(), None);
    }
}

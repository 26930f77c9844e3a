use crate::bits::{dpb, ldb, mask};
use crate::node::node_identity;
use crate::time::gregorian_timestamp;
use crate::uuid::uuid::{Uuid, VERSION_FIELD};

impl Uuid {
    /// Generates a version 6 (reordered Gregorian time-based) UUID.
    ///
    /// Same time base and node word family as v1, but the 60-bit timestamp is
    /// laid out most-significant-first, so v6 values sort lexically by
    /// generation time. The node field is a per-process random value rather
    /// than the derived node id (RFC 9562 §5.6).
    #[must_use]
    pub fn new_v6() -> Self {
        let ts = gregorian_timestamp();
        let time_high = ldb(mask(32, 28), ts);
        let time_mid = ldb(mask(16, 12), ts);
        let time_low = ldb(mask(12, 0), ts);
        let hi = time_high << 32 | time_mid << 16 | dpb(VERSION_FIELD, time_low, 6);
        Self::from_words(hi, node_identity().v6_lsb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_and_variant_bits() {
        let id = Uuid::new_v6();
        assert_eq!(id.version(), 6);
        assert_eq!(id.variant(), 0b10);
    }

    #[test]
    fn timestamp_round_trips_through_fields() {
        let before = gregorian_timestamp();
        let id = Uuid::new_v6();
        let after = gregorian_timestamp();
        let ts = id.timestamp().unwrap();
        assert!(before < ts && ts < after);
    }

    #[test]
    fn node_field_is_not_the_derived_node_id() {
        // Random 48-bit node per RFC 9562 §5.6; collision with the derived id
        // has probability 2^-47.
        let id = Uuid::new_v6();
        assert_ne!(id.node_id(), node_identity().node_id());
        assert_eq!(
            id.clock_sequence(),
            Some(node_identity().clock_sequence() & 0x3FFF)
        );
    }

    #[test]
    fn values_sort_by_generation_time() {
        let mut last = Uuid::new_v6();
        for _ in 0..10_000 {
            let id = Uuid::new_v6();
            assert!(id > last);
            last = id;
        }
    }
}

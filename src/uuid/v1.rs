use crate::bits::{dpb, ldb, mask};
use crate::node::node_identity;
use crate::time::gregorian_timestamp;
use crate::uuid::uuid::{Uuid, VERSION_FIELD};

impl Uuid {
    /// Generates a version 1 (Gregorian time-based) UUID.
    ///
    /// The 60-bit timestamp comes from the process-wide monotonic Gregorian
    /// clock, split least-significant-first across the most-significant word;
    /// the least-significant word carries the process clock sequence and the
    /// derived node id. Strictly monotone per process under the clock's total
    /// order, though the v1 field order does not sort lexically.
    #[must_use]
    pub fn new_v1() -> Self {
        let ts = gregorian_timestamp();
        let time_low = ldb(mask(32, 0), ts);
        let time_mid = ldb(mask(16, 32), ts);
        let time_high = ldb(mask(12, 48), ts);
        let hi = dpb(
            VERSION_FIELD,
            time_low << 32 | time_mid << 16 | time_high,
            1,
        );
        Self::from_words(hi, node_identity().v1_lsb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_and_variant_bits() {
        let id = Uuid::new_v1();
        assert_eq!(id.version(), 1);
        assert_eq!(id.variant(), 0b10);
    }

    #[test]
    fn timestamp_round_trips_through_fields() {
        let before = gregorian_timestamp();
        let id = Uuid::new_v1();
        let after = gregorian_timestamp();
        let ts = id.timestamp().unwrap();
        assert!(before < ts && ts < after);
    }

    #[test]
    fn node_and_sequence_come_from_process_identity() {
        let id = Uuid::new_v1();
        let identity = node_identity();
        assert_eq!(id.node_id(), identity.node_id());
        assert_eq!(
            id.clock_sequence(),
            Some(identity.clock_sequence() & 0x3FFF)
        );
        // Derived node ids always carry the multicast bit.
        assert_eq!(id.node_id() >> 40 & 1, 1);
    }

    #[test]
    fn timestamps_strictly_increase() {
        let mut last = Uuid::new_v1().timestamp().unwrap();
        for _ in 0..10_000 {
            let ts = Uuid::new_v1().timestamp().unwrap();
            assert!(ts > last);
            last = ts;
        }
    }
}

use crate::bits::dpb;
use crate::uuid::uuid::{Uuid, VARIANT_FIELD, VERSION_FIELD};

impl Uuid {
    /// Builds a version 8 (custom) UUID from caller-supplied words.
    ///
    /// RFC 9562 leaves the remaining 122 bits to the application; only the
    /// version nibble and variant bits are overwritten.
    #[must_use]
    pub const fn new_v8(hi: u64, lo: u64) -> Self {
        Self::from_words(
            dpb(VERSION_FIELD, hi, 8),
            dpb(VARIANT_FIELD, lo, 0b10),
        )
    }
}

use core::fmt;
use core::str::{FromStr, from_utf8_unchecked};

use crate::bits::{ldb, mask};
use crate::error::{Error, Result};
use crate::time::gregorian_to_unix_ms;

/// The version nibble, bits 48-51 of the wire form (bits 12-15 of `hi`).
pub(crate) const VERSION_FIELD: u64 = mask(4, 12);

/// The variant field, the top two bits of `lo`.
pub(crate) const VARIANT_FIELD: u64 = mask(2, 62);

/// An RFC 9562 Universally Unique IDentifier.
///
/// Stored as two 64-bit words interpreted big-endian over the 16-byte wire
/// form; the derived ordering is therefore the unsigned lexicographic byte
/// order of the wire form.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid {
    hi: u64,
    lo: u64,
}

impl Uuid {
    /// The nil UUID (00000000-0000-0000-0000-000000000000), version 0.
    pub const NIL: Self = Self { hi: 0, lo: 0 };

    /// The max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff).
    pub const MAX: Self = Self {
        hi: u64::MAX,
        lo: u64::MAX,
    };

    /// Name space for fully-qualified domain names (RFC 9562 §6.6).
    pub const NAMESPACE_DNS: Self = Self {
        hi: 0x6ba7_b810_9dad_11d1,
        lo: 0x80b4_00c0_4fd4_30c8,
    };

    /// Name space for URLs.
    pub const NAMESPACE_URL: Self = Self {
        hi: 0x6ba7_b811_9dad_11d1,
        lo: 0x80b4_00c0_4fd4_30c8,
    };

    /// Name space for ISO object identifiers.
    pub const NAMESPACE_OID: Self = Self {
        hi: 0x6ba7_b812_9dad_11d1,
        lo: 0x80b4_00c0_4fd4_30c8,
    };

    /// Name space for X.500 distinguished names.
    pub const NAMESPACE_X500: Self = Self {
        hi: 0x6ba7_b814_9dad_11d1,
        lo: 0x80b4_00c0_4fd4_30c8,
    };

    /// Constructs a UUID from its two big-endian 64-bit words.
    #[must_use]
    pub const fn from_words(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Returns the `(hi, lo)` word pair.
    #[must_use]
    pub const fn to_words(self) -> (u64, u64) {
        (self.hi, self.lo)
    }

    /// Constructs a UUID from its 128-bit big-endian integer form.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }

    /// Returns the 128-bit big-endian integer form.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        (self.hi as u128) << 64 | self.lo as u128
    }

    /// Constructs a UUID from its 16-byte big-endian wire form.
    #[must_use]
    pub const fn from_bytes_be(bytes: [u8; 16]) -> Self {
        Self::from_u128(u128::from_be_bytes(bytes))
    }

    /// Returns the 16-byte big-endian wire form.
    #[must_use]
    pub const fn to_bytes_be(self) -> [u8; 16] {
        self.as_u128().to_be_bytes()
    }

    /// Returns the version nibble (bits 48-51 of the wire form).
    #[must_use]
    pub const fn version(self) -> u8 {
        ldb(VERSION_FIELD, self.hi) as u8
    }

    /// Returns the variant field, the top two bits of the least-significant
    /// word; RFC 9562 UUIDs report `0b10`.
    #[must_use]
    pub const fn variant(self) -> u8 {
        ldb(VARIANT_FIELD, self.lo) as u8
    }

    /// Returns the embedded timestamp, if this version carries one.
    ///
    /// For v1 and v6 this is the 60-bit count of 100-ns intervals since
    /// 1582-10-15T00:00:00Z; for v7 it is the 48-bit count of milliseconds
    /// since the Unix epoch. Other versions carry none.
    #[must_use]
    pub const fn timestamp(self) -> Option<u64> {
        match self.version() {
            1 => {
                let time_low = ldb(mask(32, 32), self.hi);
                let time_mid = ldb(mask(16, 16), self.hi);
                let time_high = ldb(mask(12, 0), self.hi);
                Some(time_high << 48 | time_mid << 32 | time_low)
            }
            6 => {
                let time_high = ldb(mask(32, 32), self.hi);
                let time_mid = ldb(mask(16, 16), self.hi);
                let time_low = ldb(mask(12, 0), self.hi);
                Some(time_high << 28 | time_mid << 12 | time_low)
            }
            7 => Some(ldb(mask(48, 16), self.hi)),
            _ => None,
        }
    }

    /// Returns the embedded timestamp converted to Unix milliseconds, if this
    /// version carries one.
    #[must_use]
    pub const fn unix_time_ms(self) -> Option<u64> {
        match self.version() {
            1 | 6 => match self.timestamp() {
                Some(ts) => Some(gregorian_to_unix_ms(ts)),
                None => None,
            },
            7 => self.timestamp(),
            _ => None,
        }
    }

    /// Returns the low 48 bits of the least-significant word, the node id
    /// field of v1/v6.
    #[must_use]
    pub const fn node_id(self) -> u64 {
        ldb(mask(48, 0), self.lo)
    }

    /// Returns the 14-bit clock sequence for v1/v6.
    #[must_use]
    pub const fn clock_sequence(self) -> Option<u16> {
        match self.version() {
            1 | 6 => Some(ldb(mask(14, 48), self.lo) as u16),
            _ => None,
        }
    }

    /// Parses the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form
    /// (case-insensitive) or the same form behind a `urn:uuid:` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUuidString`] for any other input.
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        let canonical = if bytes.len() == 45 && bytes[..9].eq_ignore_ascii_case(b"urn:uuid:") {
            &bytes[9..]
        } else {
            bytes
        };

        if canonical.len() != 36 {
            return Err(Error::InvalidUuidString);
        }

        let mut acc = 0u128;
        for (index, &byte) in canonical.iter().enumerate() {
            match index {
                8 | 13 | 18 | 23 => {
                    if byte != b'-' {
                        return Err(Error::InvalidUuidString);
                    }
                }
                _ => {
                    let nibble = match byte {
                        b'0'..=b'9' => byte - b'0',
                        b'a'..=b'f' => byte - b'a' + 10,
                        b'A'..=b'F' => byte - b'A' + 10,
                        _ => return Err(Error::InvalidUuidString),
                    };
                    acc = acc << 4 | u128::from(nibble);
                }
            }
        }

        Ok(Self::from_u128(acc))
    }

    /// Returns the canonical 36-character lowercase string.
    #[must_use]
    pub fn to_hyphenated_string(self) -> String {
        self.to_string()
    }

    /// Returns the 32-character lowercase hex form, no hyphens.
    #[must_use]
    pub fn to_simple_string(self) -> String {
        crate::bits::hex_bytes(&self.to_bytes_be())
    }

    /// Returns the URN form: `urn:uuid:` plus the canonical string.
    #[must_use]
    pub fn to_urn_string(self) -> String {
        format!("urn:uuid:{self}")
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical lowercase hexadecimal representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let bytes = self.to_bytes_be();
        let mut buffer = [0u8; 36];
        let mut buffer_iter = buffer.iter_mut();
        for (i, byte) in bytes.iter().enumerate() {
            let e = *byte as usize;
            *buffer_iter.next().unwrap() = DIGITS[e >> 4];
            *buffer_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buffer_iter.next().unwrap() = b'-';
            }
        }
        f.write_str(unsafe { from_utf8_unchecked(&buffer) })
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Uuid");
        dbg.field("uuid", &format_args!("{self}"));
        dbg.field("version", &self.version());
        dbg.field("variant", &format_args!("{:#04b}", self.variant()));
        dbg.finish()
    }
}

impl FromStr for Uuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uuid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from_bytes_be(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.to_bytes_be()
    }
}

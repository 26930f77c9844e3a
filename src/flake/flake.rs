use core::fmt;
use core::str::{FromStr, from_utf8_unchecked};

use crate::bits::{bytes_be_to_u64, hex_u64, u64_to_bytes_be};
use crate::error::{Error, Result};
use crate::flake::base64::{FLAKE_LEN, decode_lex64, encode_lex64};
use crate::rand::{RandSource, ThreadRandom};
use crate::time::nanotime;

/// A 192-bit time-ordered identifier: a nanosecond-precision timestamp
/// followed by 128 bits of entropy.
///
/// The derived ordering compares the three words in order `(timestamp,
/// rand_hi, rand_lo)`, which equals the lexicographic order of the 24-byte
/// wire form and of the encoded string. Within a thread, freshly generated
/// flakes strictly increase with the nanoclock; across threads ordering is
/// best-effort by timestamp, with same-nanosecond collisions separated by
/// the entropy words.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flake {
    timestamp: u64,
    rand_hi: u64,
    rand_lo: u64,
}

impl Flake {
    /// Generates a flake from the process nanoclock and 128 bits of fresh
    /// entropy.
    #[must_use]
    pub fn new() -> Self {
        let rng = ThreadRandom;
        Self {
            timestamp: nanotime(),
            rand_hi: RandSource::<u64>::rand(&rng),
            rand_lo: RandSource::<u64>::rand(&rng),
        }
    }

    /// Reassembles a flake from its three 64-bit words.
    #[must_use]
    pub const fn from_parts(timestamp: u64, rand_hi: u64, rand_lo: u64) -> Self {
        Self {
            timestamp,
            rand_hi,
            rand_lo,
        }
    }

    /// The nanosecond timestamp word.
    #[must_use]
    pub const fn timestamp(self) -> u64 {
        self.timestamp
    }

    /// The high entropy word.
    #[must_use]
    pub const fn rand_hi(self) -> u64 {
        self.rand_hi
    }

    /// The low entropy word.
    #[must_use]
    pub const fn rand_lo(self) -> u64 {
        self.rand_lo
    }

    /// Returns the 24-byte big-endian wire form: timestamp, rand_hi, rand_lo.
    #[must_use]
    pub fn to_bytes_be(self) -> [u8; FLAKE_LEN] {
        let mut bytes = [0u8; FLAKE_LEN];
        u64_to_bytes_be(self.timestamp, &mut bytes, 0);
        u64_to_bytes_be(self.rand_hi, &mut bytes, 8);
        u64_to_bytes_be(self.rand_lo, &mut bytes, 16);
        bytes
    }

    /// Reconstructs a flake from its 24-byte big-endian wire form.
    #[must_use]
    pub fn from_bytes_be(bytes: [u8; FLAKE_LEN]) -> Self {
        Self {
            timestamp: bytes_be_to_u64(&bytes, 0),
            rand_hi: bytes_be_to_u64(&bytes, 8),
            rand_lo: bytes_be_to_u64(&bytes, 16),
        }
    }

    /// Returns the 48-character lowercase hex form, word by word.
    #[must_use]
    pub fn to_hex(self) -> String {
        let mut out = String::with_capacity(48);
        out.push_str(&hex_u64(self.timestamp));
        out.push_str(&hex_u64(self.rand_hi));
        out.push_str(&hex_u64(self.rand_lo));
        out
    }

    /// Parses the 32-character order-preserving string form, returning `None`
    /// for any malformed input. Flake parsing never surfaces an error.
    #[must_use]
    pub fn from_string(s: &str) -> Option<Self> {
        Self::try_parse(s).ok()
    }

    /// Fallible counterpart of [`Flake::from_string`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] or [`Error::InvalidCharacter`] as
    /// reported by the decoder.
    pub fn try_parse(s: &str) -> Result<Self> {
        decode_lex64(s).map(Self::from_bytes_be)
    }
}

impl Default for Flake {
    /// Equivalent to [`Flake::new`].
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Flake {
    /// Returns the 32-character URL-safe string form; lexical order of these
    /// strings matches the order of the flakes themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = encode_lex64(&self.to_bytes_be());
        f.write_str(unsafe { from_utf8_unchecked(&encoded) })
    }
}

impl fmt::Debug for Flake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Flake");
        dbg.field("flake", &format_args!("{self}"));
        dbg.field(
            "timestamp",
            &format_args!("{} (0x{:x})", self.timestamp, self.timestamp),
        );
        dbg.field("rand_hi", &format_args!("0x{:x}", self.rand_hi));
        dbg.field("rand_lo", &format_args!("0x{:x}", self.rand_lo));
        dbg.finish()
    }
}

impl FromStr for Flake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl TryFrom<&str> for Flake {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl From<Flake> for String {
    fn from(src: Flake) -> Self {
        src.to_string()
    }
}

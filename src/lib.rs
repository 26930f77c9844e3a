//! Unified generation and manipulation of two families of unique
//! identifiers:
//!
//! - **RFC 9562 UUIDs**: versions 1, 3, 4, 5, 6, 7, 8, the nil and max
//!   values, and the non-standard SQUUID, with strict bit-field layouts,
//!   parsing, and byte/string serialization.
//! - **Flakes**: 192-bit time-ordered identifiers pairing a
//!   nanosecond-precision timestamp with 128 bits of entropy, rendered as a
//!   32-character URL-safe string whose lexical order matches the order of
//!   the values themselves.
//!
//! ```rust
//! use keyflake::{Flake, Uuid};
//!
//! let event = keyflake::v7();
//! println!("{event}"); // e.g. "01907fd0-8c1e-7a31-b1e5-6f82ff3f06db"
//!
//! let key = keyflake::flake();
//! println!("{key}"); // e.g. "5gZ3kF0dm29YtHxWv0cbRS4nPqXw1-Ae"
//!
//! let stable = keyflake::v5(Uuid::NAMESPACE_DNS, "www.example.com").unwrap();
//! assert_eq!(stable, keyflake::v5(Uuid::NAMESPACE_DNS, "www.example.com").unwrap());
//! # let _: Flake = key;
//! ```
//!
//! Time-based generators draw on two process-wide lock-free clocks that are
//! strictly monotonic under concurrency (wall-clock regressions and counter
//! exhaustion cause brief spins, never value regressions), so v1, v6, and v7
//! form a per-process total order; flakes are strictly ordered per thread via
//! a wall-anchored nanosecond clock.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod bits;
mod error;
mod flake;
mod node;
mod rand;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde;
mod time;
mod uuid;

pub use crate::bits::*;
pub use crate::error::*;
pub use crate::flake::*;
pub use crate::node::*;
pub use crate::rand::*;
pub use crate::time::*;
pub use crate::uuid::*;

/// Returns the nil UUID (version 0, all bits clear).
#[must_use]
pub fn null() -> Uuid {
    Uuid::NIL
}

/// Returns the nil UUID; alias of [`null`].
#[must_use]
pub fn v0() -> Uuid {
    Uuid::NIL
}

/// Returns the max UUID (all bits set).
#[must_use]
pub fn max() -> Uuid {
    Uuid::MAX
}

/// Generates a version 1 (Gregorian time-based) UUID.
#[must_use]
pub fn v1() -> Uuid {
    Uuid::new_v1()
}

/// Computes a version 3 (MD5 name-based) UUID.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] when the name cannot be coerced to bytes.
pub fn v3<N>(namespace: Uuid, name: N) -> Result<Uuid>
where
    N: Name,
{
    Uuid::new_v3(namespace, &name)
}

/// Generates a version 4 (random) UUID.
#[must_use]
pub fn v4() -> Uuid {
    Uuid::new_v4()
}

/// Computes a version 5 (SHA-1 name-based) UUID.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] when the name cannot be coerced to bytes.
pub fn v5<N>(namespace: Uuid, name: N) -> Result<Uuid>
where
    N: Name,
{
    Uuid::new_v5(namespace, &name)
}

/// Generates a version 6 (reordered Gregorian time-based) UUID.
#[must_use]
pub fn v6() -> Uuid {
    Uuid::new_v6()
}

/// Generates a version 7 (Unix time-based) UUID.
#[must_use]
pub fn v7() -> Uuid {
    Uuid::new_v7()
}

/// Builds a version 8 (custom) UUID from caller-supplied words.
#[must_use]
pub fn v8(hi: u64, lo: u64) -> Uuid {
    Uuid::new_v8(hi, lo)
}

/// Generates a SQUUID: a v4 UUID whose top 32 bits are the current POSIX
/// seconds.
#[must_use]
pub fn squuid() -> Uuid {
    Uuid::new_squuid()
}

/// Generates a flake.
#[must_use]
pub fn flake() -> Flake {
    Flake::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashSet;

    #[test]
    fn null_and_max_versions() {
        assert_eq!(null(), Uuid::NIL);
        assert_eq!(max(), Uuid::MAX);
        assert_eq!(null().version(), 0);
        assert_eq!(max().version(), 15);
    }

    #[test]
    fn generated_versions_report_version_and_variant() {
        let cases: Vec<(Uuid, u8)> = vec![
            (v1(), 1),
            (v3(Uuid::NAMESPACE_DNS, "n").unwrap(), 3),
            (v4(), 4),
            (v5(Uuid::NAMESPACE_DNS, "n").unwrap(), 5),
            (v6(), 6),
            (v7(), 7),
            (v8(0, 0), 8),
        ];
        for (id, version) in cases {
            assert_eq!(id.version(), version);
            assert_eq!(id.variant(), 0b10, "version {version}");
        }
    }

    #[test]
    fn canonical_strings_match_their_version_shape() {
        for (id, version_char) in [
            (v1(), '1'),
            (v4(), '4'),
            (v6(), '6'),
            (v7(), '7'),
            (squuid(), '4'),
        ] {
            let pattern = format!(
                r"^[0-9a-f]{{8}}-[0-9a-f]{{4}}-{version_char}[0-9a-f]{{3}}-[89ab][0-9a-f]{{3}}-[0-9a-f]{{12}}$"
            );
            let re = Regex::new(&pattern).unwrap();
            assert!(re.is_match(&id.to_string()), "{id}");
        }
    }

    #[test]
    fn uuid_string_and_byte_round_trips() {
        for id in [null(), max(), v1(), v4(), v6(), v7(), squuid()] {
            assert_eq!(Uuid::parse(&id.to_string()).unwrap(), id);
            assert_eq!(Uuid::parse(&id.to_urn_string()).unwrap(), id);
            assert_eq!(Uuid::from_bytes_be(id.to_bytes_be()), id);
        }
    }

    #[test]
    fn name_coercion_accepts_the_protocol_cases() {
        let by_str = v5(Uuid::NAMESPACE_DNS, "www.example.com").unwrap();
        let by_string = v5(Uuid::NAMESPACE_DNS, String::from("www.example.com")).unwrap();
        let by_bytes = v5(Uuid::NAMESPACE_DNS, b"www.example.com".as_slice()).unwrap();
        assert_eq!(by_str, by_string);
        assert_eq!(by_str, by_bytes);

        assert_eq!(
            v3(Uuid::NIL, None::<&str>).unwrap_err(),
            Error::InvalidName
        );
    }

    #[test]
    fn time_ordered_generators_are_strictly_monotone() {
        let v6s: Vec<Uuid> = (0..1_000).map(|_| v6()).collect();
        let v7s: Vec<Uuid> = (0..1_000).map(|_| v7()).collect();
        let flakes: Vec<Flake> = (0..1_000).map(|_| flake()).collect();
        assert!(v6s.windows(2).all(|w| w[0] < w[1]));
        assert!(v7s.windows(2).all(|w| w[0] < w[1]));
        assert!(flakes.windows(2).all(|w| w[0] < w[1]));

        let v1_ts: Vec<u64> = (0..1_000).map(|_| v1().timestamp().unwrap()).collect();
        assert!(v1_ts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn flake_strings_sort_with_their_values() {
        let flakes: Vec<Flake> = (0..1_000).map(|_| flake()).collect();
        let strings: Vec<String> = flakes.iter().map(Flake::to_string).collect();
        let mut sorted = strings.clone();
        sorted.sort();
        assert_eq!(strings, sorted);
    }

    #[test]
    fn mixed_generation_yields_no_duplicates() {
        let mut ids = HashSet::new();
        for _ in 0..10_000 {
            assert!(ids.insert(v4()));
            assert!(ids.insert(v7()));
        }
    }
}

//! Serde helpers for [`Uuid`] and [`Flake`] fields, used via
//! `#[serde(with = "...")]`.
//!
//! [`Uuid`]: crate::Uuid
//! [`Flake`]: crate::Flake

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialize a UUID as its canonical hyphenated string.
pub mod as_canonical_uuid {
    use super::{Deserializer, Serializer};
    use crate::Uuid;

    /// Serialize a UUID as a canonical 36-character string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Uuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize a UUID from its canonical or URN string form.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is neither canonical nor URN form
    pub fn deserialize<'de, D>(d: D) -> Result<Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CanonicalVisitor;

        impl serde::de::Visitor<'_> for CanonicalVisitor {
            type Value = Uuid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a canonical or urn:uuid: UUID string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Uuid::parse(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(CanonicalVisitor)
    }
}

/// Serialize a UUID as its native 128-bit integer representation.
pub mod as_u128_uuid {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Uuid;

    /// Serialize a UUID as a `u128`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Uuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.as_u128().serialize(s)
    }

    /// Deserialize a UUID from a `u128`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        u128::deserialize(d).map(Uuid::from_u128)
    }
}

/// Serialize a flake as its 32-character order-preserving string.
pub mod as_lex64_flake {
    use super::{Deserializer, Serializer};
    use crate::Flake;

    /// Serialize a flake as an order-preserving base-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(flake: &Flake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(flake)
    }

    /// Deserialize a flake from its order-preserving base-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string has the wrong length or a byte outside the alphabet
    pub fn deserialize<'de, D>(d: D) -> Result<Flake, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Lex64Visitor;

        impl serde::de::Visitor<'_> for Lex64Visitor {
            type Value = Flake;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 32-character order-preserving base-64 string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Flake::try_parse(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(Lex64Visitor)
    }
}

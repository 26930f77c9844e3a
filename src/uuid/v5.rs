use sha1::{Digest, Sha1};

use crate::bits::dpb;
use crate::error::Result;
use crate::uuid::name::Name;
use crate::uuid::uuid::{Uuid, VARIANT_FIELD, VERSION_FIELD};

impl Uuid {
    /// Computes a version 5 (SHA-1 name-based) UUID.
    ///
    /// As [`Uuid::new_v3`] but hashing with SHA-1 and keeping the first 16
    /// digest bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when the name cannot be coerced to
    /// bytes.
    ///
    /// [`Error::InvalidName`]: crate::Error::InvalidName
    pub fn new_v5<N>(namespace: Uuid, name: &N) -> Result<Self>
    where
        N: Name + ?Sized,
    {
        let name_bytes = name.name_bytes()?;

        let mut hasher = Sha1::new();
        hasher.update(namespace.to_bytes_be());
        hasher.update(name_bytes.as_ref());
        let digest = hasher.finalize();

        let mut truncated = [0u8; 16];
        truncated.copy_from_slice(&digest[..16]);

        let (hi, lo) = Self::from_bytes_be(truncated).to_words();
        Ok(Self::from_words(
            dpb(VERSION_FIELD, hi, 5),
            dpb(VARIANT_FIELD, lo, 0b10),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn known_digests_for_empty_name() {
        assert_eq!(
            Uuid::new_v5(Uuid::NIL, "").unwrap().to_string(),
            "e129f27c-5103-5c5c-844b-cdf0a15e160d"
        );
        assert_eq!(
            Uuid::new_v5(Uuid::NAMESPACE_DNS, "").unwrap().to_string(),
            "4ebd0208-8328-5d69-8c44-ec50939c0967"
        );
    }

    #[test]
    fn version_and_variant_bits() {
        let id = Uuid::new_v5(Uuid::NAMESPACE_DNS, "www.example.com").unwrap();
        assert_eq!(id.version(), 5);
        assert_eq!(id.variant(), 0b10);
    }

    #[test]
    fn deterministic_and_distinct_from_v3() {
        let v5 = Uuid::new_v5(Uuid::NAMESPACE_DNS, "host.example").unwrap();
        assert_eq!(
            v5,
            Uuid::new_v5(Uuid::NAMESPACE_DNS, "host.example").unwrap()
        );
        assert_ne!(
            v5,
            Uuid::new_v3(Uuid::NAMESPACE_DNS, "host.example").unwrap()
        );
    }

    #[test]
    fn uuid_names_hash_their_wire_form() {
        let by_uuid = Uuid::new_v5(Uuid::NIL, &Uuid::NAMESPACE_DNS).unwrap();
        let by_bytes = Uuid::new_v5(Uuid::NIL, &Uuid::NAMESPACE_DNS.to_bytes_be()).unwrap();
        assert_eq!(by_uuid, by_bytes);
    }

    #[test]
    fn absent_name_is_rejected() {
        let absent: Option<Vec<u8>> = None;
        assert_eq!(
            Uuid::new_v5(Uuid::NIL, &absent).unwrap_err(),
            Error::InvalidName
        );
    }
}

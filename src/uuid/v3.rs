use md5::{Digest, Md5};

use crate::bits::dpb;
use crate::error::Result;
use crate::uuid::name::Name;
use crate::uuid::uuid::{Uuid, VARIANT_FIELD, VERSION_FIELD};

impl Uuid {
    /// Computes a version 3 (MD5 name-based) UUID.
    ///
    /// Hashes the namespace's 16-byte wire form followed by the name's byte
    /// form; the result is deterministic across calls and processes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when the name cannot be coerced to
    /// bytes.
    ///
    /// [`Error::InvalidName`]: crate::Error::InvalidName
    pub fn new_v3<N>(namespace: Uuid, name: &N) -> Result<Self>
    where
        N: Name + ?Sized,
    {
        let name_bytes = name.name_bytes()?;

        let mut hasher = Md5::new();
        hasher.update(namespace.to_bytes_be());
        hasher.update(name_bytes.as_ref());
        let digest: [u8; 16] = hasher.finalize().into();

        let (hi, lo) = Self::from_bytes_be(digest).to_words();
        Ok(Self::from_words(
            dpb(VERSION_FIELD, hi, 3),
            dpb(VARIANT_FIELD, lo, 0b10),
        ))
    }
}

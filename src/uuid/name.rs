use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::uuid::Uuid;

/// Canonical byte serialization for v3/v5 "names".
///
/// A name-based UUID hashes the namespace's wire form followed by the name's
/// byte form; this trait defines the latter. The closed set of obvious cases
/// is covered below (strings as UTF-8, UUIDs as their 16-byte wire form, raw
/// byte sequences as themselves, absent values as [`Error::InvalidName`]);
/// any other type joins the protocol by implementing the trait with some
/// deterministic byte string.
pub trait Name {
    /// Returns the deterministic byte form of this name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] when the value has no byte form, e.g.
    /// an absent `Option`.
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

impl Name for str {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl Name for String {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.as_str().name_bytes()
    }
}

impl Name for [u8] {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> Name for [u8; N] {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl Name for Vec<u8> {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl Name for Uuid {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Owned(self.to_bytes_be().to_vec()))
    }
}

#[cfg(feature = "url")]
#[cfg_attr(docsrs, doc(cfg(feature = "url")))]
impl Name for url::Url {
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_str().as_bytes()))
    }
}

impl<N> Name for &N
where
    N: Name + ?Sized,
{
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).name_bytes()
    }
}

impl<N> Name for Option<N>
where
    N: Name,
{
    fn name_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Some(name) => name.name_bytes(),
            None => Err(Error::InvalidName),
        }
    }
}

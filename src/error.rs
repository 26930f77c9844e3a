use core::fmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The input is neither a canonical UUID string nor a `urn:uuid:` form.
    InvalidUuidString,
    /// A v3/v5 name argument could not be coerced to bytes.
    InvalidName,
    /// A flake string was not exactly 32 characters long.
    InvalidLength(usize),
    /// A flake string contained a byte outside the encoding alphabet.
    InvalidCharacter { byte: u8, index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUuidString => write!(f, "invalid UUID string"),
            Error::InvalidName => write!(f, "name is not coercible to bytes"),
            Error::InvalidLength(len) => write!(f, "invalid length: {len}"),
            Error::InvalidCharacter { byte, index } => {
                write!(f, "invalid ascii byte {byte} at index {index}")
            }
        }
    }
}

impl core::error::Error for Error {}

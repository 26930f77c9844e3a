mod base64;
#[allow(clippy::module_inception)]
mod flake;

pub use base64::*;
pub use flake::*;

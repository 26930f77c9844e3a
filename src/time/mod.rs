mod gregorian;
mod interface;
mod nano;
mod unix;

pub use gregorian::*;
pub use interface::*;
pub use nano::*;
pub use unix::*;

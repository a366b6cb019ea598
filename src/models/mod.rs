pub mod chain;
pub mod verdict;
pub mod request;
pub mod outcome;

pub use chain::*;
pub use verdict::*;
pub use request::*;
pub use outcome::*;

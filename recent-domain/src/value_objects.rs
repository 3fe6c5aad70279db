// Domain value objects
pub mod identifiers;
pub mod mode;
pub mod region;

pub use identifiers::*;
pub use mode::*;
pub use region::*;

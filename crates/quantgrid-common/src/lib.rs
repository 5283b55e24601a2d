pub mod address;
pub mod error;
pub mod quantity;
pub mod unit;

pub use address::*;
pub use error::*;
pub use quantity::*;
pub use unit::*;

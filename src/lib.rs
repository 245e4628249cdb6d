pub mod double;
pub mod error;
pub mod number;
pub mod rational;

pub use error::{GeoexactError, Result};

pub mod cs;

pub use cs::compression::ppm::{compress, decompress};
pub use cs::error::{Error, Result};

//! Earthquake data: feed model, decoding, region labels and statistics.

mod date;
mod decode;
mod models;
mod region;
mod stats;

pub use date::*;
pub use decode::*;
pub use models::*;
pub use region::*;
pub use stats::*;

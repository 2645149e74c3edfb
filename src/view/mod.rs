//! Read-only projections over replay position and live state.
//! Nothing here is stored; every value is recomputed on access.
mod mode;
mod projection;
mod stats;
mod table;

pub use mode::*;
pub use projection::*;
pub use stats::*;
pub use table::*;

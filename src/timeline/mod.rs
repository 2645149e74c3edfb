//! Recorded game logs.
//!
//! A log is written once by the game server and loaded whole. Everything
//! here is immutable after load; cursors and projections live elsewhere.
mod decision;
mod event;
mod player;
mod record;
mod reflection;
mod result;
mod stage;
mod stamp;
mod timeline;

pub use decision::*;
pub use event::*;
pub use player::*;
pub use record::*;
pub use reflection::*;
pub use result::*;
pub use stage::*;
pub use stamp::*;
pub use timeline::*;
#[cfg(test)]
pub(crate) use timeline::fixtures;

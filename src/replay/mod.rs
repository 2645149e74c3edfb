//! Stepping through a recorded game.
//!
//! - [`Cursor`]: decision index plus the event index derived from it
//! - [`Autoplay`]: timer task that advances a shared cursor
//! - [`Replay`]: both of the above behind one handle
mod autoplay;
mod cursor;
mod replay;

pub use autoplay::*;
pub use cursor::*;
pub use replay::*;

//! Mutable session state shared between the live connection and the view.
mod change;
mod journal;
mod request;
mod snapshot;
mod state;
mod status;

pub use change::*;
pub use journal::*;
pub use request::*;
pub use snapshot::*;
pub use state::*;
pub use status::*;

//! Live connection to a running game server.
//!
//! ## Architecture
//!
//! - [`LiveSession`]: connection lifecycle, inbound dispatch, outbound sends
//! - [`Protocol`]: wire envelope decoding and encoding
//! - [`Dialer`] / [`Socket`] / [`Http`]: transport collaborators
//!
//! Inbound frames are applied by one pump task per connection, in arrival
//! order. The `net` feature provides WebSocket and HTTP implementations.
mod error;
mod message;
#[cfg(feature = "net")]
mod net;
mod phase;
mod session;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use error::*;
pub use message::*;
#[cfg(feature = "net")]
pub use net::*;
pub use phase::*;
pub use session::*;
pub use transport::*;

//! Resolves names to IPv4 addresses, either by walking the delegation
//! chain from a root server or by asking an upstream recursive resolver.

mod error;
mod resolve;
mod transport;

pub use error::ResolveError;
pub use resolve::{Resolver, DNS_PORT};
pub use transport::{Transport, UdpTransport};

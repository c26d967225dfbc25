//! Ferrous Lookup Infrastructure Layer
//!
//! Resolution libraries the engine can drive: one that talks to upstream
//! resolvers over UDP/TCP and one that answers from canned fixtures.

pub mod dns;
pub mod errors;

pub use dns::fixture_library::FixtureLibrary;
pub use dns::upstream_library::UpstreamLibrary;
pub use errors::{FixtureError, UpstreamError};

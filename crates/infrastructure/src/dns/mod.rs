pub mod fixture_library;
pub mod forwarding;
pub mod transport;
pub mod upstream_library;

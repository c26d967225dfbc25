pub mod engine;
pub mod errors;
pub mod logging;
pub mod root;
pub mod upstream;

pub use engine::EngineConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use upstream::{UpstreamConfig, UpstreamServer};

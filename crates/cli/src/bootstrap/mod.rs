use anyhow::Context;
use ferrous_lookup_application::ports::ResolutionLibrary;
use ferrous_lookup_domain::{CliOverrides, Config};
use ferrous_lookup_infrastructure::{FixtureLibrary, UpstreamLibrary};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Logs go to stderr so stdout carries only results. `RUST_LOG` wins over
/// the configured level.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn build_library(
    config: &Config,
    fixtures: Option<&str>,
) -> anyhow::Result<Arc<dyn ResolutionLibrary>> {
    if let Some(path) = fixtures {
        let library = FixtureLibrary::from_file(path)?;
        return Ok(Arc::new(library));
    }

    let library = UpstreamLibrary::from_config(&config.upstream)?;
    info!(
        servers = library.servers().len(),
        timeout_ms = config.upstream.timeout_ms,
        tcp_fallback = config.upstream.tcp_fallback,
        "Using upstream resolution library"
    );
    Ok(Arc::new(library))
}

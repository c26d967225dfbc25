use ferrous_lookup_domain::Config;
use serde_json::json;
use std::io::Write;

/// Prints the settings lookups would run with, after file, environment
/// and command line have been merged.
pub fn run(config: &Config, fixtures: Option<&str>, mut out: impl Write) -> anyhow::Result<bool> {
    let servers: Vec<String> = config
        .upstream
        .parsed_servers()?
        .iter()
        .map(ToString::to_string)
        .collect();

    let context = json!({
        "engine": {
            "security_only": config.engine.secure_by_default(),
            "address_family": config.engine.address_family.as_str(),
            "max_outstanding": config.engine.max_outstanding,
            "extensions": config.engine.extensions,
        },
        "upstream": {
            "servers": servers,
            "timeout_ms": config.upstream.timeout_ms,
            "tcp_fallback": config.upstream.tcp_fallback,
        },
        "fixtures": fixtures,
        "log_level": config.logging.level,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&context)?)?;
    Ok(true)
}

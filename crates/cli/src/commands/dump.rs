use anyhow::anyhow;
use ferrous_lookup_application::ports::{ResolutionLibrary, ResolutionRequest};
use ferrous_lookup_application::EventLoopAdapter;
use ferrous_lookup_domain::name;
use ferrous_lookup_domain::response::extensions::DNSSEC_RETURN_ONLY_SECURE;
use ferrous_lookup_domain::record_type::parse_type_code;
use ferrous_lookup_domain::{Config, Extensions, QueryKind};
use std::sync::Arc;

/// Asks the library directly, bypassing the decoder, and prints the tree
/// it returned.
pub fn run(
    config: &Config,
    library: Arc<dyn ResolutionLibrary>,
    qname: &str,
    qtype: &str,
) -> anyhow::Result<bool> {
    let type_code = parse_type_code(qtype).map_err(|e| anyhow!(e))?;
    name::validate(qname).map_err(|e| anyhow!("bad domain name '{}': {}", qname, e))?;

    let request = ResolutionRequest::new(
        qname,
        QueryKind::General(type_code),
        dump_extensions(config),
    );

    let event_loop = EventLoopAdapter::current_thread()?;
    let result = event_loop
        .block_on(library.resolve(request))
        .map_err(|reason| anyhow!(reason))?;
    event_loop.close();

    match result {
        Ok(tree) => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
            Ok(true)
        }
        Err(failure) => {
            println!("FAIL: {}: {}", qname, failure);
            Ok(false)
        }
    }
}

/// The extensions the engine would send for a general lookup.
fn dump_extensions(config: &Config) -> Extensions {
    let mut extensions = config.engine.extensions.clone();
    if config.engine.secure_by_default() {
        extensions.enable(DNSSEC_RETURN_ONLY_SECURE);
    }
    extensions
}

use crate::output::PrintSink;
use anyhow::anyhow;
use ferrous_lookup_application::ports::ResolutionLibrary;
use ferrous_lookup_application::ResolutionEngine;
use ferrous_lookup_domain::record_type::parse_type_code;
use ferrous_lookup_domain::Config;
use std::sync::Arc;

pub fn run(
    config: &Config,
    library: Arc<dyn ResolutionLibrary>,
    qname: &str,
    qtype: &str,
) -> anyhow::Result<bool> {
    let type_code = parse_type_code(qtype).map_err(|e| anyhow!(e))?;

    let sink = Arc::new(PrintSink::new(std::io::stdout(), std::io::stderr()));
    let mut engine = ResolutionEngine::<()>::new(config.engine.clone(), library, sink.clone())?;

    if let Err(e) = engine.submit_general(qname, type_code, ()) {
        sink.submission_failed(qname, &e);
        return Ok(false);
    }

    Ok(engine.run()?.all_succeeded())
}

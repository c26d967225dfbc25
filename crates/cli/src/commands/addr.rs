use crate::output::PrintSink;
use ferrous_lookup_application::ports::ResolutionLibrary;
use ferrous_lookup_application::ResolutionEngine;
use ferrous_lookup_domain::{AddressFamilyFilter, Config, QueryFilters, SubmissionError};
use std::sync::Arc;
use tracing::{debug, info};

/// Submits every name up front and prints results as they complete. When
/// the engine is full, the outstanding batch is run to completion first.
pub fn run(
    config: &Config,
    library: Arc<dyn ResolutionLibrary>,
    names: &[String],
    family: AddressFamilyFilter,
    secure: bool,
) -> anyhow::Result<bool> {
    let sink = Arc::new(PrintSink::new(std::io::stdout(), std::io::stderr()));
    let mut engine = ResolutionEngine::<()>::new(config.engine.clone(), library, sink.clone())?;
    let filters = QueryFilters::new(family, secure);

    let mut all_succeeded = true;
    let mut submitted = 0usize;

    for name in names {
        let result = match engine.submit_address(name, filters, ()) {
            Err(SubmissionError::EngineBusy { limit }) => {
                debug!(limit, "Engine full, draining outstanding lookups");
                all_succeeded &= engine.run()?.all_succeeded();
                engine.submit_address(name, filters, ())
            }
            other => other,
        };

        match result {
            Ok(_) => submitted += 1,
            Err(e) => {
                sink.submission_failed(name, &e);
                all_succeeded = false;
            }
        }
    }

    let summary = engine.run()?;
    info!(
        submitted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Address lookups finished"
    );

    Ok(all_succeeded && summary.all_succeeded())
}

mod resolution_library;
mod result_sink;

pub use resolution_library::{ResolutionLibrary, ResolutionRequest};
pub use result_sink::{ResultSink, TransactionOutcome, TransactionReport};

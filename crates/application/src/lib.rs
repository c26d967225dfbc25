//! Ferrous Lookup Application Layer
pub mod decoder;
pub mod engine;
pub mod ports;

pub use engine::{EventLoopAdapter, ResolutionEngine, RunSummary, SubmitHandle};
pub use ports::{
    ResolutionLibrary, ResolutionRequest, ResultSink, TransactionOutcome, TransactionReport,
};

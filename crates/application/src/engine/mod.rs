mod admission;
mod event_loop;
mod submit_handle;
mod transaction;

pub use event_loop::EventLoopAdapter;
pub use submit_handle::SubmitHandle;

use crate::decoder::decode_response;
use crate::ports::{
    ResolutionLibrary, ResolutionRequest, ResultSink, TransactionOutcome, TransactionReport,
};
use admission::Admission;
use ferrous_lookup_domain::config::EngineConfig;
use ferrous_lookup_domain::response::extensions::{
    DNSSEC_RETURN_ONLY_SECURE, EXTENSION_FALSE, EXTENSION_TRUE, RETURN_BOTH_V4_AND_V6,
};
use ferrous_lookup_domain::{
    AddressFamilyFilter, EngineError, Extensions, QueryFilters, QueryKind, SubmissionError,
    TransactionContext, TransactionId,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use transaction::{resolve_transaction, Event, Notification};

/// Terminal notifications delivered during one `run`, by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub transport_errors: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &TransactionOutcome) {
        match outcome {
            TransactionOutcome::Addresses(_) | TransactionOutcome::Records(_) => {
                self.succeeded += 1
            }
            TransactionOutcome::Failed(_) => self.failed += 1,
            TransactionOutcome::Cancelled => self.cancelled += 1,
            TransactionOutcome::TransportError(_) => self.transport_errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.cancelled + self.transport_errors
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total()
    }
}

struct InFlight<C> {
    context: TransactionContext<C>,
    token: CancellationToken,
}

/// Asynchronous DNS resolution engine.
///
/// Queries are submitted without blocking and resolved by a
/// [`ResolutionLibrary`] on the engine's own event loop. `run` drives that
/// loop until every outstanding transaction has produced exactly one
/// terminal notification, each delivered to the [`ResultSink`] on the
/// calling thread. `C` is the caller's correlation data, handed back with
/// every report.
pub struct ResolutionEngine<C> {
    event_loop: Option<EventLoopAdapter>,
    core: EngineCore<C>,
}

struct EngineCore<C> {
    config: EngineConfig,
    library: Arc<dyn ResolutionLibrary>,
    sink: Arc<dyn ResultSink<C>>,
    admission: Arc<Admission>,
    in_flight: FxHashMap<TransactionId, InFlight<C>>,
    notifications_tx: mpsc::UnboundedSender<Notification>,
    notifications_rx: mpsc::UnboundedReceiver<Notification>,
    queue_tx: mpsc::UnboundedSender<TransactionContext<C>>,
    queue_rx: mpsc::UnboundedReceiver<TransactionContext<C>>,
    shutdown: CancellationToken,
    summary: RunSummary,
}

enum Wake<C> {
    Queued(Option<TransactionContext<C>>),
    Notified(Option<Notification>),
}

impl<C> ResolutionEngine<C> {
    pub fn new(
        config: EngineConfig,
        library: Arc<dyn ResolutionLibrary>,
        sink: Arc<dyn ResultSink<C>>,
    ) -> Result<Self, EngineError> {
        validate_config(&config)?;
        let event_loop =
            EventLoopAdapter::current_thread().map_err(|e| EngineError::EventLoopFailure {
                reason: format!("failed to build event loop: {}", e),
                abandoned: 0,
            })?;
        Self::with_event_loop(config, library, sink, event_loop)
    }

    pub fn with_event_loop(
        config: EngineConfig,
        library: Arc<dyn ResolutionLibrary>,
        sink: Arc<dyn ResultSink<C>>,
        event_loop: EventLoopAdapter,
    ) -> Result<Self, EngineError> {
        validate_config(&config)?;

        let (notifications_tx, notifications_rx) = mpsc::unbounded_channel();
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();

        info!(
            max_outstanding = config.max_outstanding,
            security_only = config.secure_by_default(),
            address_family = config.address_family.as_str(),
            extensions = config.extensions.len(),
            "Resolution engine created"
        );

        Ok(Self {
            event_loop: Some(event_loop),
            core: EngineCore {
                admission: Arc::new(Admission::new(&config)),
                config,
                library,
                sink,
                in_flight: FxHashMap::default(),
                notifications_tx,
                notifications_rx,
                queue_tx,
                queue_rx,
                shutdown: CancellationToken::new(),
                summary: RunSummary::default(),
            },
        })
    }

    /// Submits an A/AAAA lookup. Returns as soon as the transaction is
    /// registered; nothing resolves until `run` is called.
    pub fn submit_address(
        &mut self,
        name: &str,
        filters: QueryFilters,
        correlation: C,
    ) -> Result<TransactionId, SubmissionError> {
        self.submit(name, QueryKind::Address, filters, correlation)
    }

    /// Submits a lookup for one RR type. Meta types (0, OPT, TKEY, TSIG)
    /// are rejected with `BadType`.
    pub fn submit_general(
        &mut self,
        name: &str,
        type_code: u16,
        correlation: C,
    ) -> Result<TransactionId, SubmissionError> {
        self.submit(
            name,
            QueryKind::General(type_code),
            QueryFilters::default(),
            correlation,
        )
    }

    fn submit(
        &mut self,
        name: &str,
        kind: QueryKind,
        filters: QueryFilters,
        correlation: C,
    ) -> Result<TransactionId, SubmissionError> {
        let event_loop = self
            .event_loop
            .as_ref()
            .ok_or(SubmissionError::EngineShutDown)?;
        let context = self.core.admission.admit(name, kind, filters, correlation)?;
        let id = context.id;
        self.core.launch(context, event_loop);
        Ok(id)
    }

    /// A handle for submitting from other threads or from inside the sink.
    pub fn submit_handle(&self) -> SubmitHandle<C> {
        SubmitHandle::new(Arc::clone(&self.core.admission), self.core.queue_tx.clone())
    }

    /// Drives the event loop until no transaction is outstanding.
    ///
    /// On failure every transaction still outstanding is abandoned: it gets
    /// a `Cancelled` notification and its context is released before the
    /// error is returned.
    pub fn run(&mut self) -> Result<RunSummary, EngineError> {
        let Some(event_loop) = self.event_loop.as_ref() else {
            return Err(EngineError::EventLoopFailure {
                reason: "engine has been shut down".to_string(),
                abandoned: 0,
            });
        };
        let core = &mut self.core;
        core.summary = RunSummary::default();

        info!(outstanding = core.admission.outstanding(), "Running event loop");

        match event_loop.block_on(core.drive(event_loop)).and_then(|r| r) {
            Ok(()) => {
                let summary = std::mem::take(&mut core.summary);
                info!(
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    cancelled = summary.cancelled,
                    transport_errors = summary.transport_errors,
                    "Event loop idle"
                );
                Ok(summary)
            }
            Err(reason) => {
                let abandoned = core.abandon_all();
                warn!(reason = %reason, abandoned, "Event loop failed");
                Err(EngineError::EventLoopFailure { reason, abandoned })
            }
        }
    }

    /// Cancels one transaction. Its `Cancelled` notification is delivered
    /// before this returns. Returns false when `id` is not outstanding.
    pub fn cancel(&mut self, id: TransactionId) -> bool {
        if let Some(event_loop) = self.event_loop.as_ref() {
            self.core.launch_queued(event_loop);
        }
        match self.core.in_flight.remove(&id) {
            Some(in_flight) => {
                in_flight.token.cancel();
                debug!(id = %id, "Transaction cancelled by caller");
                self.core.finish(in_flight.context, TransactionOutcome::Cancelled);
                true
            }
            None => false,
        }
    }

    /// Cancels everything outstanding, then releases the event loop.
    /// Safe to call any number of times.
    pub fn shutdown(&mut self) {
        let Some(event_loop) = self.event_loop.take() else {
            return;
        };
        self.core.admission.close();
        self.core.queue_rx.close();

        let cancelled = self.core.abandon_all();
        self.core.shutdown.cancel();
        event_loop.close();

        info!(cancelled, "Resolution engine shut down");
    }

    /// Transactions admitted and not yet terminal, including queued ones.
    pub fn outstanding(&self) -> usize {
        self.core.admission.outstanding()
    }

    pub fn is_shut_down(&self) -> bool {
        self.event_loop.is_none()
    }
}

impl<C> Drop for ResolutionEngine<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<C> EngineCore<C> {
    async fn drive(&mut self, event_loop: &EventLoopAdapter) -> Result<(), String> {
        loop {
            self.launch_queued(event_loop);
            // an empty in-flight map with slots still taken means a handle
            // has admitted a submission that is not on the queue yet
            if self.in_flight.is_empty() && self.admission.outstanding() == 0 {
                return Ok(());
            }

            let wake = tokio::select! {
                biased;
                queued = self.queue_rx.recv() => Wake::Queued(queued),
                notification = self.notifications_rx.recv() => Wake::Notified(notification),
            };

            match wake {
                Wake::Queued(Some(context)) => self.launch(context, event_loop),
                Wake::Queued(None) => {}
                Wake::Notified(Some(notification)) => self.dispatch(notification),
                Wake::Notified(None) => return Err("notification channel closed".to_string()),
            }
        }
    }

    fn launch(&mut self, context: TransactionContext<C>, event_loop: &EventLoopAdapter) {
        let request = ResolutionRequest::new(
            Arc::clone(&context.name),
            context.kind,
            extensions_for(&self.config, context.kind, &context.filters),
        )
        .with_address_family(context.filters.address_family);
        let token = self.shutdown.child_token();

        event_loop.spawn(resolve_transaction(
            context.id,
            Arc::clone(&self.library),
            request,
            token.clone(),
            self.notifications_tx.clone(),
        ));

        debug!(
            id = %context.id,
            name = %context.name,
            kind = %context.kind,
            address_family = context.filters.address_family.as_str(),
            security_only = context.filters.security_only,
            "Transaction submitted"
        );
        self.in_flight.insert(context.id, InFlight { context, token });
    }

    fn launch_queued(&mut self, event_loop: &EventLoopAdapter) {
        while let Ok(context) = self.queue_rx.try_recv() {
            self.launch(context, event_loop);
        }
    }

    fn dispatch(&mut self, notification: Notification) {
        let Some(in_flight) = self.in_flight.remove(&notification.id) else {
            debug!(id = %notification.id, "Ignoring notification for a finished transaction");
            return;
        };
        let context = in_flight.context;

        let outcome = match notification.event {
            Event::Completed(response) => {
                decode_response(context.kind, &context.filters, &response)
            }
            Event::TransportError(failure) => TransactionOutcome::TransportError(failure),
        };
        self.finish(context, outcome);
    }

    /// Delivers the terminal notification, then drops the context.
    fn finish(&mut self, context: TransactionContext<C>, outcome: TransactionOutcome) {
        match &outcome {
            TransactionOutcome::Failed(failure) => {
                debug!(id = %context.id, name = %context.name, failure = %failure, "Query failed")
            }
            TransactionOutcome::TransportError(failure) => warn!(
                id = %context.id,
                name = %context.name,
                code = failure.code,
                message = %failure.message,
                "Transport error"
            ),
            TransactionOutcome::Records(records) if !records.is_clean() => warn!(
                id = %context.id,
                name = %context.name,
                faults = records.faults.len(),
                "Skipped malformed records"
            ),
            _ => {}
        }
        debug!(
            id = %context.id,
            state = outcome.terminal_state().as_str(),
            elapsed_ms = context.elapsed().as_millis() as u64,
            "Transaction finished"
        );

        self.summary.record(&outcome);
        self.admission.release();
        self.sink.deliver(TransactionReport {
            id: context.id,
            context: &context,
            outcome,
        });
    }

    /// Cancels every launched and queued transaction. Submissions a sink
    /// queues while being notified here are left for the next run.
    fn abandon_all(&mut self) -> usize {
        let mut ids: Vec<TransactionId> = self.in_flight.keys().copied().collect();
        ids.sort_unstable();
        let queued: Vec<TransactionContext<C>> =
            std::iter::from_fn(|| self.queue_rx.try_recv().ok()).collect();
        let abandoned = ids.len() + queued.len();

        for id in ids {
            if let Some(in_flight) = self.in_flight.remove(&id) {
                in_flight.token.cancel();
                self.finish(in_flight.context, TransactionOutcome::Cancelled);
            }
        }
        for context in queued {
            self.finish(context, TransactionOutcome::Cancelled);
        }
        abandoned
    }
}

/// Config extensions with the per-transaction flags written over them, so
/// the library never sees a flag that disagrees with the filters.
fn extensions_for(config: &EngineConfig, kind: QueryKind, filters: &QueryFilters) -> Extensions {
    let mut extensions = config.extensions.clone();
    if filters.security_only {
        extensions.enable(DNSSEC_RETURN_ONLY_SECURE);
    }
    if kind == QueryKind::Address {
        let both = filters.address_family == AddressFamilyFilter::Any;
        extensions.set(
            RETURN_BOTH_V4_AND_V6,
            if both { EXTENSION_TRUE } else { EXTENSION_FALSE },
        );
    }
    extensions
}

fn validate_config(config: &EngineConfig) -> Result<(), EngineError> {
    config
        .validate()
        .map_err(|e| EngineError::ConfigInvalid(e.to_string()))
}

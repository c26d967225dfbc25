use super::admission::Admission;
use ferrous_lookup_domain::{
    QueryFilters, QueryKind, SubmissionError, TransactionContext, TransactionId,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Submits queries to an engine from other threads or from inside a
/// result sink.
///
/// Validation and admission happen here, synchronously. The admitted
/// transaction is queued for the loop thread and launched the next time the
/// engine drives its loop; a shut-down engine cancels whatever is queued.
pub struct SubmitHandle<C> {
    admission: Arc<Admission>,
    queue: mpsc::UnboundedSender<TransactionContext<C>>,
}

impl<C> Clone for SubmitHandle<C> {
    fn clone(&self) -> Self {
        Self {
            admission: Arc::clone(&self.admission),
            queue: self.queue.clone(),
        }
    }
}

impl<C> SubmitHandle<C> {
    pub(crate) fn new(
        admission: Arc<Admission>,
        queue: mpsc::UnboundedSender<TransactionContext<C>>,
    ) -> Self {
        Self { admission, queue }
    }

    pub fn submit_address(
        &self,
        name: &str,
        filters: QueryFilters,
        correlation: C,
    ) -> Result<TransactionId, SubmissionError> {
        self.submit(name, QueryKind::Address, filters, correlation)
    }

    pub fn submit_general(
        &self,
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
        &self,
        name: &str,
        kind: QueryKind,
        filters: QueryFilters,
        correlation: C,
    ) -> Result<TransactionId, SubmissionError> {
        let context = self.admission.admit(name, kind, filters, correlation)?;
        let id = context.id;

        if self.queue.send(context).is_err() {
            self.admission.release();
            return Err(SubmissionError::EngineShutDown);
        }

        debug!(id = %id, name = %name, kind = %kind, "Submission queued for the event loop");
        Ok(id)
    }
}

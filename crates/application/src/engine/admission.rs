use ferrous_lookup_domain::config::EngineConfig;
use ferrous_lookup_domain::{
    name, AddressFamilyFilter, QueryFilters, QueryKind, RecordType, SubmissionError,
    TransactionContext, TransactionId,
};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Submission checks shared by the engine and its submit handles.
///
/// Admission is synchronous: a submission that passes gets its id and an
/// outstanding slot before it reaches the loop thread.
pub(crate) struct Admission {
    next_id: AtomicU64,
    outstanding: AtomicUsize,
    limit: usize,
    closed: AtomicBool,
    security_only: bool,
    address_family: AddressFamilyFilter,
}

impl Admission {
    pub(crate) fn new(config: &EngineConfig) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            outstanding: AtomicUsize::new(0),
            limit: config.max_outstanding,
            closed: AtomicBool::new(false),
            security_only: config.secure_by_default(),
            address_family: config.address_family,
        }
    }

    pub(crate) fn admit<C>(
        &self,
        target: &str,
        kind: QueryKind,
        filters: QueryFilters,
        correlation: C,
    ) -> Result<TransactionContext<C>, SubmissionError> {
        if self.is_closed() {
            return Err(SubmissionError::EngineShutDown);
        }
        name::validate(target).map_err(|reason| SubmissionError::BadName {
            name: target.to_string(),
            reason,
        })?;
        if let QueryKind::General(code) = kind {
            if RecordType::is_query_forbidden(code) {
                return Err(SubmissionError::BadType(code));
            }
        }

        self.outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.limit).then_some(n + 1)
            })
            .map_err(|_| SubmissionError::EngineBusy { limit: self.limit })?;

        let id = TransactionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        Ok(TransactionContext::new(
            id,
            target,
            kind,
            self.effective_filters(filters),
            correlation,
        ))
    }

    /// Engine-wide settings fill in what the caller left at its default.
    fn effective_filters(&self, filters: QueryFilters) -> QueryFilters {
        let address_family = match filters.address_family {
            AddressFamilyFilter::Any => self.address_family,
            family => family,
        };
        QueryFilters::new(address_family, filters.security_only || self.security_only)
    }

    pub(crate) fn release(&self) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

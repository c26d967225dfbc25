use crate::query::{QueryFilters, QueryKind};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a transaction. Every transaction leaves `Submitted` exactly
/// once, into one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionState {
    Submitted,
    Completed,
    Cancelled,
    TransportError,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionState::Submitted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Submitted => "submitted",
            TransactionState::Completed => "completed",
            TransactionState::Cancelled => "cancelled",
            TransactionState::TransportError => "transport_error",
        }
    }
}

/// Per-query state owned by the engine from submission to terminal
/// notification. `C` is caller-supplied correlation data.
#[derive(Debug)]
pub struct TransactionContext<C> {
    pub id: TransactionId,
    pub name: Arc<str>,
    pub kind: QueryKind,
    pub filters: QueryFilters,
    pub correlation: C,
    pub submitted_at: Instant,
}

impl<C> TransactionContext<C> {
    pub fn new(
        id: TransactionId,
        name: impl Into<Arc<str>>,
        kind: QueryKind,
        filters: QueryFilters,
        correlation: C,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            filters,
            correlation,
            submitted_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.submitted_at.elapsed()
    }
}

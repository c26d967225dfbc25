use ferrous_lookup_domain::{
    DecodedAddress, DecodedRecords, QueryFailure, TransactionContext, TransactionId,
    TransactionState, TransportFailure,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Address query decoded; may be empty when the family filter dropped
    /// every entry.
    Addresses(Vec<DecodedAddress>),
    Records(DecodedRecords),
    Failed(QueryFailure),
    Cancelled,
    TransportError(TransportFailure),
}

impl TransactionOutcome {
    pub fn terminal_state(&self) -> TransactionState {
        match self {
            TransactionOutcome::Addresses(_)
            | TransactionOutcome::Records(_)
            | TransactionOutcome::Failed(_) => TransactionState::Completed,
            TransactionOutcome::Cancelled => TransactionState::Cancelled,
            TransactionOutcome::TransportError(_) => TransactionState::TransportError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TransactionOutcome::Addresses(_) | TransactionOutcome::Records(_)
        )
    }
}

/// Terminal notification for one transaction. The context is borrowed; the
/// engine releases it as soon as `deliver` returns.
#[derive(Debug)]
pub struct TransactionReport<'a, C> {
    pub id: TransactionId,
    pub context: &'a TransactionContext<C>,
    pub outcome: TransactionOutcome,
}

/// Consumer of decoded results. Called on the event loop thread, exactly
/// once per transaction.
pub trait ResultSink<C> {
    fn deliver(&self, report: TransactionReport<'_, C>);
}

use ferrous_lookup_application::ports::{ResultSink, TransactionOutcome, TransactionReport};
use ferrous_lookup_domain::{QueryFilters, QueryKind, TransactionId};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct Delivery<C> {
    pub id: TransactionId,
    pub name: String,
    pub kind: QueryKind,
    pub filters: QueryFilters,
    pub correlation: C,
    pub outcome: TransactionOutcome,
}

pub struct RecordingSink<C> {
    deliveries: Mutex<Vec<Delivery<C>>>,
}

impl<C: Clone> RecordingSink<C> {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery<C>> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn count_for(&self, id: TransactionId) -> usize {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.id == id)
            .count()
    }

    pub fn outcome_for(&self, id: TransactionId) -> Option<TransactionOutcome> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.outcome.clone())
    }
}

impl<C: Clone> ResultSink<C> for RecordingSink<C> {
    fn deliver(&self, report: TransactionReport<'_, C>) {
        assert_eq!(report.id, report.context.id);
        self.deliveries.lock().unwrap().push(Delivery {
            id: report.id,
            name: report.context.name.to_string(),
            kind: report.context.kind,
            filters: report.context.filters,
            correlation: report.context.correlation.clone(),
            outcome: report.outcome,
        });
    }
}

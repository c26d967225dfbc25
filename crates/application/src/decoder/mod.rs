//! Read-only decoding of response trees into typed results.
//!
//! Nothing here performs I/O or keeps state; every function borrows the raw
//! response and leaves its release to the caller.

mod address;
mod records;
mod status;

pub use address::decode_addresses;
pub use records::decode_records;
pub use status::read_status;

use crate::ports::TransactionOutcome;
use ferrous_lookup_domain::{QueryFailure, QueryFilters, QueryKind, ResponseValue, StatusCode};

/// Maps a completed response to the outcome reported for its transaction.
/// The status is read first; only a good status is decoded further.
pub fn decode_response(
    kind: QueryKind,
    filters: &QueryFilters,
    raw: &ResponseValue,
) -> TransactionOutcome {
    let status = match read_status(raw) {
        Ok(status) => status,
        Err(fault) => return TransactionOutcome::Failed(fault.into()),
    };

    match status {
        StatusCode::Good => match kind {
            QueryKind::Address => match decode_addresses(raw, filters.address_family) {
                Ok(addresses) => TransactionOutcome::Addresses(addresses),
                Err(failure) => TransactionOutcome::Failed(failure),
            },
            QueryKind::General(_) => match decode_records(raw) {
                Ok(records) => TransactionOutcome::Records(records),
                Err(failure) => TransactionOutcome::Failed(failure),
            },
        },
        StatusCode::NoSecureAnswers => TransactionOutcome::Failed(QueryFailure::NoSecureAnswers),
        StatusCode::NoName => TransactionOutcome::Failed(QueryFailure::NonexistentDomain),
        other => TransactionOutcome::Failed(QueryFailure::BadStatus(other)),
    }
}

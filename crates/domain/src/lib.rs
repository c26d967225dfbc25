//! Ferrous Lookup Domain Layer
pub mod config;
pub mod decoded;
pub mod errors;
pub mod name;
pub mod query;
pub mod record_type;
pub mod response;
pub mod transaction;

pub use config::{CliOverrides, Config, ConfigError, UpstreamServer};
pub use decoded::{AddressFamily, DecodedAddress, DecodedRecord, DecodedRecords, RecordFault};
pub use errors::{DecodeFault, EngineError, NameError, QueryFailure, SubmissionError, TransportFailure};
pub use query::{AddressFamilyFilter, QueryFilters, QueryKind};
pub use record_type::RecordType;
pub use response::{Bindata, Dict, Extensions, ResponseValue, StatusCode, ValueKind};
pub use transaction::{TransactionContext, TransactionId, TransactionState};

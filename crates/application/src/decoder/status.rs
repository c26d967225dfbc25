use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{DecodeFault, ResponseValue, StatusCode};

pub fn read_status(raw: &ResponseValue) -> Result<StatusCode, DecodeFault> {
    raw.int_field(fields::STATUS).map(StatusCode::from_code)
}

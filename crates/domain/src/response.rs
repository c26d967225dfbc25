pub mod bindata;
pub mod extensions;
pub mod status;
pub mod value;

pub use bindata::Bindata;
pub use extensions::Extensions;
pub use status::StatusCode;
pub use value::{Dict, ResponseValue, ValueKind};

/// Field names of the response tree shared by libraries and the decoder.
pub mod fields {
    pub const STATUS: &str = "status";
    pub const JUST_ADDRESS_ANSWERS: &str = "just_address_answers";
    pub const ADDRESS_TYPE: &str = "address_type";
    pub const ADDRESS_DATA: &str = "address_data";
    pub const REPLIES_TREE: &str = "replies_tree";
    pub const HEADER: &str = "header";
    pub const QUESTION: &str = "question";
    pub const ANSWER: &str = "answer";
    pub const AUTHORITY: &str = "authority";
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const CLASS: &str = "class";
    pub const TTL: &str = "ttl";
    pub const RDATA: &str = "rdata";
    pub const RDATA_RAW: &str = "rdata_raw";
}

#![allow(dead_code)]
pub mod dns_server_mock;
pub mod mock_reply;

pub use dns_server_mock::{MockDnsServer, Responder};
pub use mock_reply::{question_type, MockReply};

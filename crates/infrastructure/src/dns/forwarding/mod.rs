pub mod message_builder;
pub mod reply_tree;
pub mod response_parser;

pub use message_builder::{MessageBuilder, QueryMessage};
pub use response_parser::{ParsedReply, ResponseParser, WireQuestion, WireRecord};

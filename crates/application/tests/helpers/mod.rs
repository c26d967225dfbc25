#![allow(dead_code)]

pub mod builders;
pub mod mock_library;
pub mod recording_sink;

pub use builders::*;
pub use mock_library::{Behavior, MockLibrary};
pub use recording_sink::{Delivery, RecordingSink};

pub mod source;

pub use source::{parse_event, LineSource};

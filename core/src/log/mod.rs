mod event;
pub mod event_type;
mod reader;

pub use event::{EventCategory, EventValue, ParsedEvent};
pub use reader::{classify_bytes, read_log_file};
pub(crate) use reader::line_ranges;

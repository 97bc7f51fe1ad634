pub mod reporter;
pub mod writer_jsonl;

pub use reporter::{format_headers, format_line, OutputFormat, Reporter};
pub use writer_jsonl::{write_event, Event, ResultEvent};

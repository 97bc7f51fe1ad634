pub mod dispatcher;
pub mod resolver;
pub mod result;

pub use dispatcher::Dispatcher;
pub use resolver::{resolve, ProbeRequest};
pub use result::{ProbeOutcome, ProbeResult};

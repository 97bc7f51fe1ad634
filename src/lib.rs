pub mod catalogue;
pub mod target;
pub mod config;
pub mod http_client;
pub mod concurrent;
pub mod probe;
pub mod classify;
pub mod output;
pub mod feed;
pub mod controller;

// re-export the pieces most callers need
pub use crate::catalogue::{Catalogue, PayloadTemplate};
pub use crate::classify::{classify, Classification};
pub use crate::config::ScanConfig;
pub use crate::controller::{RunController, RunState, RunSummary};
pub use crate::probe::{Dispatcher, ProbeOutcome, ProbeResult};
pub use crate::target::Target;

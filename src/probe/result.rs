use std::fmt;

use reqwest::Method;

/// What came back for one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    /// DNS failure, refused connection, timeout, invalid header, ...
    TransportError(String),
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Position of the payload in the catalogue.
    pub index: usize,
    pub method: Method,
    /// Origin plus path of the target.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    pub fn status(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Status(code) => Some(code),
            ProbeOutcome::TransportError(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::TransportError(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Status(code) => write!(f, "{}", code),
            ProbeOutcome::TransportError(_) => write!(f, "ERR"),
        }
    }
}

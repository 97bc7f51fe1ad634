use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::classify::{classify, Classification};
use crate::probe::{ProbeOutcome, ProbeResult};
use crate::target::Target;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEvent {
    pub index: usize,
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub error: Option<String>,
    pub interesting: bool,
    pub headers: Vec<HeaderPair>,
}

/// One JSON Lines record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Result(ResultEvent),
    Skipped {
        target: String,
        baseline_status: Option<u16>,
        error: Option<String>,
    },
    Invalid {
        target: String,
        error: String,
    },
}

impl From<&ProbeResult> for ResultEvent {
    fn from(r: &ProbeResult) -> Self {
        let (status, error) = match &r.outcome {
            ProbeOutcome::Status(code) => (Some(*code), None),
            ProbeOutcome::TransportError(e) => (None, Some(e.clone())),
        };
        Self {
            index: r.index,
            url: r.url.clone(),
            method: r.method.to_string(),
            status,
            error,
            interesting: classify(r) == Classification::Interesting,
            headers: r
                .headers
                .iter()
                .map(|(name, value)| HeaderPair {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

impl Event {
    pub fn skipped(target: &Target, baseline: &ProbeOutcome) -> Self {
        let (baseline_status, error) = match baseline {
            ProbeOutcome::Status(code) => (Some(*code), None),
            ProbeOutcome::TransportError(e) => (None, Some(e.clone())),
        };
        Event::Skipped {
            target: target.raw.clone(),
            baseline_status,
            error,
        }
    }
}

pub fn write_event<W: Write>(out: &mut W, event: &Event) -> anyhow::Result<()> {
    let line = serde_json::to_string(event)?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

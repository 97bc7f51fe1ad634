use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;

use crate::catalogue::Catalogue;
use crate::concurrent::ConcurrentProbe;
use crate::probe::resolver::{resolve, ProbeRequest};
use crate::probe::result::{ProbeOutcome, ProbeResult};
use crate::target::Target;

/// Sends the catalogue against a target through the shared pool.
/// Applies no policy of its own: whatever it is handed gets sent.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    pool: ConcurrentProbe,
}

impl Dispatcher {
    pub fn new(client: Client, pool: ConcurrentProbe) -> Self {
        Self { client, pool }
    }

    pub fn pool(&self) -> &ConcurrentProbe {
        &self.pool
    }

    /// One result per catalogue entry, delivered as each request completes.
    pub fn dispatch(&self, target: &Arc<Target>, catalogue: &Catalogue) -> mpsc::Receiver<ProbeResult> {
        let requests: Vec<ProbeRequest> = catalogue
            .iter()
            .enumerate()
            .map(|(index, template)| resolve(index, template, target))
            .collect();

        tracing::debug!(url=%target.raw, requests=requests.len(), "dispatching catalogue");

        let client = self.client.clone();
        self.pool.stream(requests, move |req| {
            let client = client.clone();
            async move { execute(&client, req).await }
        })
    }

    /// Same as [`Dispatcher::dispatch`], collected and put back in catalogue order.
    pub async fn dispatch_ordered(&self, target: &Arc<Target>, catalogue: &Catalogue) -> Vec<ProbeResult> {
        let mut rx = self.dispatch(target, catalogue);
        let mut results = Vec::with_capacity(catalogue.len());
        while let Some(result) = rx.recv().await {
            results.push(result);
        }
        results.sort_by_key(|r| r.index);
        results
    }

    /// Bare GET against the target, used to decide whether it is worth probing.
    /// `None` if the run was cancelled before a slot freed up.
    pub async fn baseline(&self, target: &Target) -> Option<ProbeOutcome> {
        let _permit = self.pool.acquire().await?;
        let outcome = match self.client.get(target.url.clone()).send().await {
            Ok(resp) => ProbeOutcome::Status(resp.status().as_u16()),
            Err(e) => ProbeOutcome::TransportError(describe_error(&e)),
        };
        tracing::debug!(url=%target.raw, outcome=%outcome, "baseline");
        Some(outcome)
    }
}

async fn execute(client: &Client, req: ProbeRequest) -> ProbeResult {
    let mut builder = client.request(req.method.clone(), req.target.url.clone());
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let outcome = match builder.send().await {
        Ok(resp) => ProbeOutcome::Status(resp.status().as_u16()),
        Err(e) => {
            tracing::debug!(url=%req.target.raw, method=%req.method, error=%e, "probe failed");
            ProbeOutcome::TransportError(describe_error(&e))
        }
    };

    ProbeResult {
        index: req.index,
        method: req.method,
        url: req.target.display_url(),
        headers: req.headers,
        outcome,
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_builder() {
        "request"
    } else if e.is_redirect() {
        "redirect"
    } else {
        "transport"
    };

    // Display already carries the cause chain (DNS, refused, ...)
    format!("{} error: {}", kind, e)
}


use std::io::Write;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::catalogue::Catalogue;
use crate::classify::{classify, is_restricted, Classification};
use crate::concurrent::ConcurrentProbe;
use crate::config::ScanConfig;
use crate::http_client::create_client;
use crate::output::Reporter;
use crate::probe::{Dispatcher, ProbeOutcome};
use crate::target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ReadingTargets,
    Dispatching,
    Reporting,
    Done,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub targets: usize,
    pub probed: usize,
    pub skipped: usize,
    pub invalid: usize,
    pub results: usize,
    pub interesting: usize,
    pub transport_errors: usize,
    pub cancelled: bool,
}

/// Walks the target list, gates each target on its baseline status unless
/// forced, fans the catalogue out and streams results to the reporter.
pub struct RunController {
    catalogue: Arc<Catalogue>,
    dispatcher: Dispatcher,
    force: bool,
    cancel: CancellationToken,
    state: RunState,
}

impl RunController {
    pub fn new(config: &ScanConfig, catalogue: Catalogue, cancel: CancellationToken) -> anyhow::Result<Self> {
        anyhow::ensure!(!catalogue.is_empty(), "payload catalogue is empty");
        let client = create_client(config)?;
        let pool = ConcurrentProbe::new(config.threads, cancel.clone());
        Ok(Self::with_dispatcher(
            Dispatcher::new(client, pool),
            catalogue,
            config.force,
            cancel,
        ))
    }

    pub fn with_dispatcher(
        dispatcher: Dispatcher,
        catalogue: Catalogue,
        force: bool,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            dispatcher,
            force,
            cancel,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn transition(&mut self, next: RunState) {
        tracing::trace!(from=?self.state, to=?next, "state");
        self.state = next;
    }

    pub async fn run<W: Write>(
        &mut self,
        raw_targets: &[String],
        reporter: &mut Reporter<W>,
    ) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();
        self.transition(RunState::ReadingTargets);

        for raw in raw_targets {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            summary.targets += 1;

            let target = match Target::parse(raw) {
                Ok(t) => Arc::new(t),
                Err(e) => {
                    tracing::warn!(target_url=%raw, error=%e, "skipping malformed target");
                    reporter.report_invalid(raw, &e)?;
                    summary.invalid += 1;
                    continue;
                }
            };

            if !self.force {
                match self.dispatcher.baseline(&target).await {
                    None => {
                        summary.cancelled = true;
                        break;
                    }
                    Some(ProbeOutcome::Status(code)) if is_restricted(code) => {}
                    Some(outcome) => {
                        tracing::info!(target_url=%target.raw, baseline=%outcome, "target not restricted, skipping");
                        reporter.report_skipped(&target, &outcome)?;
                        summary.skipped += 1;
                        continue;
                    }
                }
            }

            self.transition(RunState::Dispatching);
            tracing::info!(target_url=%target.raw, payloads=self.catalogue.len(), "probing");
            let mut rx = self.dispatcher.dispatch(&target, &self.catalogue);

            self.transition(RunState::Reporting);
            let mut received = 0;
            while let Some(result) = rx.recv().await {
                received += 1;
                if result.is_error() {
                    summary.transport_errors += 1;
                } else if classify(&result) == Classification::Interesting {
                    summary.interesting += 1;
                    tracing::info!(url=%result.url, method=%result.method, headers=?result.headers, "possible bypass");
                }
                reporter.report_result(&result)?;
            }
            summary.results += received;
            reporter.end_target()?;
            summary.probed += 1;

            if received < self.catalogue.len() {
                tracing::warn!(target_url=%target.raw, received, expected=self.catalogue.len(), "target interrupted");
                summary.cancelled = true;
                break;
            }
            self.transition(RunState::ReadingTargets);
        }

        self.transition(RunState::Done);
        Ok(summary)
    }
}

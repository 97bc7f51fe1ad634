use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Semaphore-bounded executor shared by every target of a run, so the
/// limit holds globally rather than per target.
#[derive(Clone)]
pub struct ConcurrentProbe {
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

/// Slot in the pool. Released on drop.
pub struct ProbePermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for ProbePermit {
    fn drop(&mut self) {
        // runs before the semaphore permit field is released
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ConcurrentProbe {
    pub fn new(concurrency: usize, cancel: CancellationToken) -> Self {
        let limit = concurrency.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            cancel,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait for a free slot. Returns `None` once the run is cancelled.
    pub async fn acquire(&self) -> Option<ProbePermit> {
        let permit = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return None,
            p = self.semaphore.clone().acquire_owned() => p.ok()?,
        };
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        Some(ProbePermit {
            _permit: permit,
            in_flight: self.in_flight.clone(),
        })
    }

    /// Run `task_fn` over `tasks`, at most `limit` at a time, yielding outputs
    /// on the returned channel as they complete. The channel closes when every
    /// started task has finished. Tasks not yet started when the run is
    /// cancelled are dropped.
    pub fn stream<T, F, Fut>(&self, tasks: Vec<T>, task_fn: F) -> mpsc::Receiver<Fut::Output>
    where
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: std::future::Future + Send + 'static,
        Fut::Output: Send + 'static,
        T: Send + 'static,
    {
        // sized so a finished task never waits on a slow consumer while holding a slot
        let (tx, rx) = mpsc::channel(tasks.len().max(1));
        let pool = self.clone();

        tokio::spawn(async move {
            let mut running = FuturesUnordered::new();

            for task in tasks {
                let Some(permit) = pool.acquire().await else {
                    tracing::debug!("pool cancelled, not starting remaining tasks");
                    break;
                };
                let task_fn = task_fn.clone();
                let completed = pool.completed.clone();
                let tx = tx.clone();

                running.push(tokio::spawn(async move {
                    let output = task_fn(task).await;
                    completed.fetch_add(1, Ordering::Relaxed);
                    drop(permit);
                    let _ = tx.send(output).await;
                }));
            }

            while let Some(joined) = running.next().await {
                if let Err(e) = joined {
                    tracing::error!(error=%e, "probe task failed to complete");
                }
            }
        });

        rx
    }

    /// Highest number of simultaneously held permits seen so far.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Tasks that ran to completion.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

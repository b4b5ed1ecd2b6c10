// src/pipeline/mod.rs
// =============================================================================
// The concurrent part of the program.
//
//   pages -> Producer -> [task channel] -> Worker x N -> [results channel] -> Consumer
//
// - producer: sends every page, then closes the task channel
// - worker:   takes pages, checks them, sends results back
// - consumer: reads exactly as many results as pages were sent
//
// run() wires the three together for one batch of pages.
// =============================================================================

mod consumer;
mod page;
mod producer;
mod worker;

pub use consumer::Consumer;
pub use page::{Page, TRANSPORT_ERROR};
pub use producer::Producer;
pub use worker::{Worker, WorkerStats};

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::Result;

/// How the worker pool behaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of workers
    pub concurrency: usize,
    /// How long an idle worker waits before logging a heartbeat
    pub idle_timeout: Duration,
    /// Pause after each processed page
    pub throttle: Duration,
}

// Runs every page through `process` using a pool of workers and returns the
// checked pages in the order they finished.
//
// `on_result` is called once per finished page.
pub async fn run<F, Fut, P>(
    pages: Vec<Page>,
    config: &PipelineConfig,
    process: F,
    on_result: P,
) -> Result<Vec<Page>>
where
    F: Fn(Page) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Page> + Send + 'static,
    P: FnMut(),
{
    let expected = pages.len();
    let concurrency = config.concurrency.max(1);

    // A small buffer is enough: the producer only needs to stay one step ahead
    let (task_tx, task_rx) = async_channel::bounded(1);
    let (result_tx, result_rx) = mpsc::channel(concurrency);

    info!(pages = expected, workers = concurrency, "starting pipeline");

    let workers: Vec<_> = (1..=concurrency)
        .map(|id| {
            let worker = Worker::new(
                id,
                config.idle_timeout,
                config.throttle,
                task_rx.clone(),
                result_tx.clone(),
            );
            tokio::spawn(worker.perform(process.clone()))
        })
        .collect();

    // Only the workers may hold these now. Keeping our copies would stop the
    // consumer from noticing if every worker died.
    drop(task_rx);
    drop(result_tx);

    tokio::spawn(Producer::new(task_tx).perform(pages));

    let report = Consumer::new(result_rx).perform(expected, on_result).await?;

    // The producer has closed the task channel by now, so every worker is on
    // its way out (at most one throttle delay away).
    for (id, joined) in join_all(workers).await.into_iter().enumerate() {
        match joined {
            Ok(stats) => debug!(
                worker = id + 1,
                processed = stats.processed,
                heartbeats = stats.heartbeats,
                "worker joined"
            ),
            Err(e) => warn!(worker = id + 1, "worker task failed: {}", e),
        }
    }

    info!(results = report.len(), "pipeline finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn config(concurrency: usize) -> PipelineConfig {
        PipelineConfig {
            concurrency,
            idle_timeout: Duration::from_millis(20),
            throttle: Duration::ZERO,
        }
    }

    fn pages(n: usize) -> Vec<Page> {
        (1..=n)
            .map(|i| Page::new(format!("http://example.com/{i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_every_page_checked_once() {
        let statuses: Arc<HashMap<String, u16>> = Arc::new(
            pages(10)
                .into_iter()
                .enumerate()
                .map(|(i, p)| (p.location, if i % 3 == 0 { 500 } else { 200 }))
                .collect(),
        );

        let lookup = statuses.clone();
        let process = move |mut page: Page| {
            let lookup = lookup.clone();
            async move {
                page.status_code = lookup[&page.location];
                page
            }
        };

        let mut ticks = 0;
        let report = run(pages(10), &config(4), process, || ticks += 1)
            .await
            .unwrap();

        assert_eq!(report.len(), 10);
        assert_eq!(ticks, 10);
        for page in &report {
            assert_eq!(page.status_code, statuses[&page.location]);
        }
    }

    #[tokio::test]
    async fn test_single_worker_keeps_input_order() {
        let process = |mut page: Page| async move {
            page.status_code = 200;
            page
        };

        let report = run(pages(5), &config(1), process, || {}).await.unwrap();

        let locations: Vec<_> = report.iter().map(|p| p.location.clone()).collect();
        let expected: Vec<_> = pages(5).into_iter().map(|p| p.location).collect();
        assert_eq!(locations, expected);
    }

    #[tokio::test]
    async fn test_only_given_pages_are_processed() {
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let process = move |page: Page| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { page }
        };

        let report = run(pages(2), &config(3), process, || {}).await.unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_results_in_completion_order() {
        // The first page is slow, so with two workers the second one wins
        let process = |mut page: Page| async move {
            if page.location.ends_with("/1") {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            page.status_code = 200;
            page
        };

        let report = run(pages(2), &config(2), process, || {}).await.unwrap();

        assert_eq!(report[0].location, "http://example.com/2");
        assert_eq!(report[1].location, "http://example.com/1");
    }

    #[tokio::test]
    async fn test_panicking_workers_surface_as_error() {
        let process = |page: Page| async move {
            if page.location.ends_with("/1") {
                panic!("boom");
            }
            page
        };

        let err = run(pages(1), &config(1), process, || {}).await.unwrap_err();
        assert!(matches!(err, Error::ResultsClosed { expected: 1, received: 0 }));
    }
}

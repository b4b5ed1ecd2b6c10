// src/pipeline/worker.rs
// =============================================================================
// A worker pulls pages from the shared task channel, runs them through a
// processing function, and pushes the result into the results channel.
//
// Each worker loops over two kinds of events:
//
//   1. A task arrives    -> process it, send the result, then sleep for the
//                           throttle delay before taking the next one
//   2. Nothing arrives   -> log a heartbeat ("waiting...") and keep waiting
//      within idle_timeout
//
// The only way out of the loop is the task channel being closed and drained.
//
//   Waiting --task--> Processing --sent + throttle--> Waiting
//   Waiting --tick--> Waiting
//   Waiting --closed--> Terminated
//
// Rust concepts:
// - Generics with trait bounds: the worker accepts any async closure
// - tokio::time::timeout: races a future against a timer
// =============================================================================

use std::future::Future;
use std::time::Duration;

use async_channel::Receiver;
use tokio::sync::mpsc::Sender;
use tokio::time;
use tracing::{debug, warn};

use super::Page;

pub struct Worker {
    id: usize,
    idle_timeout: Duration,
    throttle: Duration,
    tasks: Receiver<Page>,
    results: Sender<Page>,
}

/// What a worker did during its lifetime, returned when it terminates
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub processed: usize,
    pub heartbeats: usize,
}

// What woke the worker up
enum Wakeup {
    Task(Page),
    Closed,
    Idle,
}

impl Worker {
    pub fn new(
        id: usize,
        idle_timeout: Duration,
        throttle: Duration,
        tasks: Receiver<Page>,
        results: Sender<Page>,
    ) -> Self {
        Worker {
            id,
            idle_timeout,
            throttle,
            tasks,
            results,
        }
    }

    // Runs until the task channel is closed and empty.
    //
    // `process` must always return a page: fetch failures are expected to be
    // folded into the status code by the caller, the worker never looks at it.
    //
    // Meant to be spawned as its own tokio task.
    pub async fn perform<F, Fut>(self, process: F) -> WorkerStats
    where
        F: Fn(Page) -> Fut,
        Fut: Future<Output = Page>,
    {
        let mut stats = WorkerStats::default();

        loop {
            match self.next_wakeup().await {
                Wakeup::Task(task) => {
                    let result = process(task).await;

                    if self.results.send(result).await.is_err() {
                        warn!(worker = self.id, "results channel closed, stopping worker");
                        break;
                    }
                    stats.processed += 1;

                    if !self.throttle.is_zero() {
                        time::sleep(self.throttle).await;
                    }
                }
                Wakeup::Idle => {
                    stats.heartbeats += 1;
                    debug!(worker = self.id, "waiting...");
                }
                Wakeup::Closed => break,
            }
        }

        debug!(
            worker = self.id,
            processed = stats.processed,
            heartbeats = stats.heartbeats,
            "worker terminated"
        );
        stats
    }

    async fn next_wakeup(&self) -> Wakeup {
        // A zero timeout would spin, so it means "no heartbeats"
        if self.idle_timeout.is_zero() {
            return match self.tasks.recv().await {
                Ok(task) => Wakeup::Task(task),
                Err(_) => Wakeup::Closed,
            };
        }

        // recv() is cancel-safe: if the timer wins, no task is lost
        match time::timeout(self.idle_timeout, self.tasks.recv()).await {
            Ok(Ok(task)) => Wakeup::Task(task),
            Ok(Err(_)) => Wakeup::Closed,
            Err(_elapsed) => Wakeup::Idle,
        }
    }
}

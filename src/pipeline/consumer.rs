// src/pipeline/consumer.rs
// =============================================================================
// The consumer collects results from the workers.
//
// The results channel is never closed while the run is going (every worker
// holds a sender until it sees the task channel closed), so the consumer
// cannot wait for "end of stream". Instead it is told how many results to
// expect and stops after exactly that many.
//
// Results come back in the order they finished, NOT the sitemap order.
// =============================================================================

use tokio::sync::mpsc::Receiver;

use super::Page;
use crate::error::{Error, Result};

pub struct Consumer {
    results: Receiver<Page>,
}

impl Consumer {
    pub fn new(results: Receiver<Page>) -> Self {
        Consumer { results }
    }

    // Receives `expected` results, calling `on_result` after each one
    // (that's where the progress bar ticks).
    //
    // `expected` must match the number of tasks that were actually sent.
    // If all senders go away early we return ResultsClosed instead of
    // waiting forever.
    pub async fn perform<F>(&mut self, expected: usize, mut on_result: F) -> Result<Vec<Page>>
    where
        F: FnMut(),
    {
        let mut report = Vec::with_capacity(expected);

        while report.len() < expected {
            match self.results.recv().await {
                Some(page) => {
                    report.push(page);
                    on_result();
                }
                None => {
                    return Err(Error::ResultsClosed {
                        expected,
                        received: report.len(),
                    })
                }
            }
        }

        Ok(report)
    }
}

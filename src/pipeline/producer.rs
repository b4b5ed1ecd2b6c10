// src/pipeline/producer.rs
// =============================================================================
// The producer pushes the list of pages into the task channel and then
// closes it.
//
// Closing the channel is how the workers learn that there is no more work:
// once it is closed AND empty, recv() returns an error and each worker stops.
//
// The producer owns the only Sender, and perform() takes `self` by value, so
// there can never be a second writer or a second close.
// =============================================================================

use async_channel::Sender;
use tracing::{debug, warn};

use super::Page;

pub struct Producer {
    tasks: Sender<Page>,
}

impl Producer {
    pub fn new(tasks: Sender<Page>) -> Self {
        Producer { tasks }
    }

    // Sends every page in order, then closes the channel.
    //
    // Meant to run in its own tokio task: send() waits while the channel is
    // full, so it would deadlock if it ran on the same task as the consumer.
    //
    // Returns the number of pages that were actually sent.
    pub async fn perform(self, pages: Vec<Page>) -> usize {
        let total = pages.len();
        let mut sent = 0;

        for page in pages {
            if self.tasks.send(page).await.is_err() {
                // Only possible when every worker is gone
                warn!(sent, total, "task channel has no receivers, stopping early");
                break;
            }
            sent += 1;
        }

        self.tasks.close();
        debug!(sent, "task channel closed");
        sent
    }
}

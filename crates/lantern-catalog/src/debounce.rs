//! Search input debouncing.
//!
//! Keystrokes arrive faster than a view is worth recomputing. The debouncer
//! holds the latest query and only releases it once no newer query has
//! arrived for a full quiescence window.
//!
//! ```text
//! submit("b") submit("ba") submit("bac") ··· 250ms quiet ··· → "bac"
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Default quiescence window.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Capacity of the settled-query channel.
const OUTPUT_CAPACITY: usize = 16;

/// Last-value-wins debouncer for search queries.
///
/// Dropping the handle stops the background task; a query still waiting for
/// its window is discarded.
#[derive(Debug)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Spawn the debouncer on the current tokio runtime.
    ///
    /// Returns the handle and the receiver that yields settled queries. A
    /// window too long to schedule releases each query immediately.
    #[must_use]
    pub fn spawn(window: Duration) -> (Self, mpsc::Receiver<String>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::channel(OUTPUT_CAPACITY);
        let task = tokio::spawn(run(window, input_rx, output_tx));
        (Self { input, task }, output_rx)
    }

    /// Submit a query, superseding any query still waiting for its window.
    ///
    /// Returns `false` if the debouncer has stopped (its receiver was
    /// dropped).
    pub fn submit(&self, query: impl Into<String>) -> bool {
        self.input.send(query.into()).is_ok()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    window: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::Sender<String>,
) {
    let mut pending: Option<(String, Instant)> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);

        tokio::select! {
            biased;

            () = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                if let Some((query, _)) = pending.take() {
                    debug!(query = %query, "search query settled");
                    if output.send(query).await.is_err() {
                        return;
                    }
                }
            }

            next = input.recv() => {
                let Some(query) = next else {
                    return;
                };
                trace!(query = %query, "search input");
                let now = Instant::now();
                let at = now.checked_add(window).unwrap_or(now);
                pending = Some((query, at));
            }
        }
    }
}

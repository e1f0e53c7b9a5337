use super::types::StatusResponse;
use crate::error::{DreamshotError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2_000);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Observer invoked with every status snapshot fetched while polling
pub type PollObserver = Arc<dyn Fn(&StatusResponse) + Send + Sync>;

/// Options for [`crate::client::DreamshotClient::wait_for_completion`]
#[derive(Clone)]
pub struct WaitOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub on_poll: Option<PollObserver>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
            on_poll: None,
        }
    }
}

impl WaitOptions {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn on_poll(mut self, observer: impl Fn(&StatusResponse) + Send + Sync + 'static) -> Self {
        self.on_poll = Some(Arc::new(observer));
        self
    }
}

/// Fetch status snapshots until one is terminal.
///
/// The deadline is checked after each fetch, so one fetch past the deadline
/// can still happen. Errors from `fetch` end the loop immediately.
pub(crate) async fn poll_until_terminal<F, Fut>(
    generation_id: &str,
    options: &WaitOptions,
    mut fetch: F,
) -> Result<StatusResponse>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<StatusResponse>>,
{
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        let status = fetch().await?;
        polls += 1;

        if let Some(observer) = &options.on_poll {
            observer(&status);
        }

        if status.status.is_terminal() {
            debug!(
                "Generation {} reached {} after {} poll(s)",
                generation_id, status.status, polls
            );
            return Ok(status);
        }

        if started.elapsed() > options.timeout {
            return Err(DreamshotError::timeout(generation_id, options.timeout));
        }

        tokio::time::sleep(options.poll_interval).await;
    }
}

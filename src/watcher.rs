use anyhow::{bail, Result};
use log::{error, info, warn};
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::fetcher::{Outcome, StatusFetcher};
use crate::notifier::Notifier;
use crate::reading::StatusReading;

/// Watches the mail client's counters and owns the previous-observation
/// baseline the decision rule compares against.
pub struct MailWatcher<F, N> {
    fetcher: F,
    notifier: N,
    poll_interval: Duration,
    /// Most recently accepted reading. `None` until the first valid
    /// observation, and again whenever the client is confirmed stopped.
    baseline: Option<StatusReading>,
}

impl<F: StatusFetcher, N: Notifier> MailWatcher<F, N> {
    pub fn new(fetcher: F, notifier: N, poll_interval: Duration) -> Self {
        Self {
            fetcher,
            notifier,
            poll_interval,
            baseline: None,
        }
    }

    /// Poll until cancelled or the status output turns malformed.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let outcome = self.fetcher.fetch().await;
                    self.observe(outcome)?;
                }
                _ = cancel.cancelled() => {
                    info!("watch loop shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Apply one classified observation to the baseline, notifying when the
    /// mail counters grew. Errors only on malformed output, which is fatal.
    fn observe(&mut self, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Unavailable => {
                info!("mail client is not running");
                // Counts restart from zero when the client comes back, so a
                // reading taken before the stop must not serve as a baseline.
                self.baseline = None;
            }
            Outcome::NoData => {
                warn!("no status this cycle; keeping the previous baseline");
            }
            Outcome::Malformed { raw, integers } => {
                error!("unparseable status output {raw:?} (integers found: {integers:?})");
                bail!("status output changed shape; refusing to keep polling");
            }
            Outcome::Reading(current) => self.accept(current),
        }
        Ok(())
    }

    fn accept(&mut self, current: StatusReading) {
        let Some(previous) = self.baseline else {
            info!("initial reading: {current}");
            self.baseline = Some(current);
            return;
        };

        if !current.grew_since(&previous).mail_arrived() {
            // Deletions and read-status changes move `total` without any
            // mail arriving; the baseline still tracks them.
            self.baseline = Some(current);
            return;
        }

        let counts = current.delta(&previous).clipped();
        info!("mail arrived: {current} (was {previous})");

        if self.notifier.notify(&counts) {
            self.baseline = Some(current);
        } else {
            // The external counts have not been consumed, so the stale
            // baseline stays and the same growth is re-evaluated next cycle.
            warn!("notification failed; keeping the old baseline");
        }
    }
}

//! Periodic closing of task lists left open past their day.
//!
//! Each tick closes every list dated yesterday or earlier that is still
//! open, in one conditional update. A failed sweep is logged and the next
//! tick picks up the same backlog.

use std::time::Duration;

use chrono::Utc;
use perfectme_core::calendar::DayClock;
use perfectme_core::types::Timestamp;
use perfectme_db::repositories::TaskListRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Default time between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Background job that force-closes stale open task lists.
pub struct AutoCloseSweeper {
    pool: PgPool,
    clock: DayClock,
    interval: Duration,
}

impl AutoCloseSweeper {
    pub fn new(pool: PgPool, clock: DayClock, interval: Duration) -> Self {
        Self {
            pool,
            clock,
            interval,
        }
    }

    /// Run the sweep loop until `cancel` is triggered.
    ///
    /// The first tick fires immediately, so a restart catches up at once.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            offset = %self.clock.offset(),
            "Auto-close sweeper started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Auto-close sweeper stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_once(Utc::now()).await {
                        tracing::error!(error = %e, "Auto-close sweep failed");
                    }
                }
            }
        }
    }

    /// Close every open list dated on or before yesterday relative to `now`.
    ///
    /// All lists closed by one sweep share `now` as their `closed_at`.
    /// Returns the number of lists closed.
    pub async fn sweep_once(&self, now: Timestamp) -> Result<u64, sqlx::Error> {
        let cutoff = self.clock.yesterday_at(now);
        let closed = TaskListRepo::close_stale(&self.pool, cutoff, now).await?;

        if closed > 0 {
            tracing::info!(closed, %cutoff, "Auto-close: closed stale task lists");
        } else {
            tracing::debug!(%cutoff, "Auto-close: nothing to close");
        }
        Ok(closed)
    }
}

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    config::TimerConfig,
    engine::{attempts, FinishTrigger},
    error::{ClubError, Precondition},
    metrics::{self, ATTEMPT_TIMER_TICKS_TOTAL},
    store::SharedStore,
};

/// Background sweep that closes attempts whose contest clock has run out,
/// whether or not a client is watching the timer stream.
pub struct AttemptTimer {
    store: SharedStore,
    config: TimerConfig,
}

impl AttemptTimer {
    pub fn new(store: SharedStore, config: TimerConfig) -> Self {
        Self { store, config }
    }

    pub async fn run(&self) {
        let interval = Duration::from_millis(self.config.sweep_interval_ms);
        info!(
            "Starting attempt timer loop (interval {}ms)",
            interval.as_millis()
        );

        loop {
            let expired = self.run_once(Utc::now()).await;
            ATTEMPT_TIMER_TICKS_TOTAL
                .with_label_values(&["success"])
                .inc();
            if expired > 0 {
                info!(expired, "Attempt timer closed expired attempts");
            }

            sleep(interval).await;
        }
    }

    /// Finish every attempt that is out of time at `now`; returns how many closed.
    pub async fn run_once(&self, now: DateTime<Utc>) -> usize {
        let mut store = self.store.write().await;
        let mut closed = 0;

        for attempt_id in attempts::expired_attempt_ids(&store, now) {
            match attempts::finish_attempt(&mut store, FinishTrigger::TimeLimit, &attempt_id, now) {
                Ok(finished) => {
                    metrics::record_attempt_completed(finished.speed_bonus);
                    info!(
                        attempt_id = %finished.id,
                        user_id = %finished.user_id,
                        score = finished.score,
                        "Attempt closed at time limit"
                    );
                    closed += 1;
                }
                Err(ClubError::PreconditionFailed(Precondition::AttemptAlreadyCompleted)) => {}
                Err(err) => {
                    ATTEMPT_TIMER_TICKS_TOTAL
                        .with_label_values(&["error"])
                        .inc();
                    warn!(attempt_id = %attempt_id, error = %err, "Failed to close expired attempt");
                }
            }
        }

        closed
    }
}

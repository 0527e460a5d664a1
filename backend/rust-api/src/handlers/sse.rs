use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Extension,
};
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::{
    error::ClubResult,
    metrics::SSE_CONNECTIONS_ACTIVE,
    middlewares::auth::JwtClaims,
    models::timer::{TimeExpired, TimerEvent, TimerTick},
    services::{contest_service::ContestService, AppState},
};

/// Keeps the active-stream gauge in step with dropped connections.
struct ConnectionGuard;

impl ConnectionGuard {
    fn open() -> Self {
        SSE_CONNECTIONS_ACTIVE.inc();
        ConnectionGuard
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        SSE_CONNECTIONS_ACTIVE.dec();
    }
}

struct Countdown {
    state: Arc<AppState>,
    attempt_id: String,
    start_time: DateTime<Utc>,
    total_seconds: u64,
    tick_interval: Duration,
    finished: bool,
    _guard: ConnectionGuard,
}

/// SSE countdown for an attempt
/// GET /api/v1/attempts/{id}/stream
pub async fn attempt_stream(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(attempt_id): Path<String>,
) -> ClubResult<impl IntoResponse> {
    let service = ContestService::new(state.store.clone());
    let (attempt, total_seconds) = service.attempt_clock(&claims.sub, &attempt_id).await?;

    let tick_interval = Duration::from_millis(state.config.timer.tick_interval_ms);
    tracing::info!(
        attempt_id = %attempt_id,
        total_seconds,
        tick_interval_ms = tick_interval.as_millis() as u64,
        "Client connected to attempt timer stream"
    );

    let countdown = Countdown {
        state: state.clone(),
        attempt_id,
        start_time: attempt.start_time,
        total_seconds,
        tick_interval,
        finished: attempt.is_completed,
        _guard: ConnectionGuard::open(),
    };

    // A completed attempt gets its closing event straight away.
    let closing = attempt.is_completed.then(|| {
        let event = TimerEvent::TimeExpired(TimeExpired {
            attempt_id: attempt.id.clone(),
            timestamp: Utc::now(),
            final_score: Some(attempt.score),
            message: "Attempt already finished".to_string(),
        });
        Ok(sse_event(&event))
    });

    let stream = stream::iter(closing).chain(create_timer_stream(countdown));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn sse_event(event: &TimerEvent) -> Event {
    Event::default()
        .event(event.event_name())
        .data(event.to_sse_data())
}

/// Tick until the contest clock runs out, then close the attempt and emit
/// `time-expired`. Ends quietly if the attempt is finished some other way.
fn create_timer_stream(countdown: Countdown) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(countdown, |mut countdown| async move {
        if countdown.finished {
            return None;
        }

        let now = Utc::now();
        let elapsed = (now - countdown.start_time).num_seconds().max(0) as u64;

        if elapsed >= countdown.total_seconds {
            let service = ContestService::new(countdown.state.store.clone());
            let final_score = match service.expire_attempt(&countdown.attempt_id).await {
                Ok(finished) => Some(finished.score),
                Err(e) => {
                    tracing::debug!(attempt_id = %countdown.attempt_id, error = %e, "Attempt already closed");
                    None
                }
            };

            let expired = TimerEvent::TimeExpired(TimeExpired {
                attempt_id: countdown.attempt_id.clone(),
                timestamp: now,
                final_score,
                message: "Time limit exceeded".to_string(),
            });
            tracing::info!("Timer expired: attempt={}", countdown.attempt_id);

            countdown.finished = true;
            return Some((Ok(sse_event(&expired)), countdown));
        }

        let still_open = countdown
            .state
            .store
            .read()
            .await
            .attempt(&countdown.attempt_id)
            .is_some_and(|a| a.is_open());
        if !still_open {
            tracing::debug!(attempt_id = %countdown.attempt_id, "Attempt closed, ending timer stream");
            return None;
        }

        let tick = TimerEvent::TimerTick(TimerTick {
            attempt_id: countdown.attempt_id.clone(),
            remaining_seconds: countdown.total_seconds - elapsed,
            elapsed_seconds: elapsed,
            total_seconds: countdown.total_seconds,
            timestamp: now,
        });

        sleep(countdown.tick_interval).await;

        Some((Ok(sse_event(&tick)), countdown))
    })
}

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, HistogramVec, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Contest Metrics
    pub static ref CONTEST_ATTEMPTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "contest_attempts_total",
        "Contest attempts by lifecycle outcome",
        &["status"]
    )
    .unwrap();

    pub static ref CONTEST_ATTEMPTS_OPEN: IntGauge = register_int_gauge!(
        "contest_attempts_open",
        "Number of contest attempts currently open"
    )
    .unwrap();

    pub static ref ANSWERS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "answers_submitted_total",
        "Total number of answers submitted",
        &["mode", "correct"]
    )
    .unwrap();

    pub static ref SPEED_BONUS_POINTS: Histogram = register_histogram!(
        "speed_bonus_points",
        "Speed bonus awarded per finished attempt",
        vec![0.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0]
    )
    .unwrap();

    pub static ref SSE_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "sse_connections_active",
        "Number of active attempt timer streams"
    )
    .unwrap();

    pub static ref ATTEMPT_TIMER_TICKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "attempt_timer_ticks_total",
        "Total number of attempt timer sweeps",
        &["status"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

pub fn record_answer(mode: &str, correct: bool) {
    ANSWERS_SUBMITTED_TOTAL
        .with_label_values(&[mode, if correct { "true" } else { "false" }])
        .inc();
}

pub fn record_attempt_started() {
    CONTEST_ATTEMPTS_TOTAL.with_label_values(&["started"]).inc();
    CONTEST_ATTEMPTS_OPEN.inc();
}

pub fn record_attempt_rejected() {
    CONTEST_ATTEMPTS_TOTAL.with_label_values(&["rejected"]).inc();
}

pub fn record_attempt_completed(speed_bonus: u64) {
    CONTEST_ATTEMPTS_TOTAL
        .with_label_values(&["completed"])
        .inc();
    CONTEST_ATTEMPTS_OPEN.dec();
    SPEED_BONUS_POINTS.observe(speed_bonus as f64);
}

//! Contest scoring and ranking engine.
//!
//! Everything here is synchronous and operates on a borrowed
//! [`ClubStore`](crate::store::ClubStore). Time-dependent operations take the
//! current instant as an argument, so callers (services, the timer worker,
//! tests) decide what "now" is.

pub mod attempts;
pub mod grading;
pub mod practice;
pub mod ranking;
pub mod scoring;

pub use attempts::{finish_attempt, start_attempt, submit_answer, AnswerOutcome, FinishTrigger};
pub use grading::grade;
pub use practice::{submit_practice_answer, PracticeOutcome};
pub use ranking::{contest_leaderboard, overall_leaderboard, profile_stats};
pub use scoring::{accuracy_percent, speed_bonus, FALLBACK_TIME_LIMIT_SECONDS};

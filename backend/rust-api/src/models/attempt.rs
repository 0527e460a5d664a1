use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One user's timed run through one contest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContestAttempt {
    pub id: String,
    pub user_id: String,
    pub contest_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Running raw score while open; raw score plus speed bonus once completed.
    pub score: u64,
    /// At most one record per challenge.
    pub answers: Vec<AnswerRecord>,
    /// Wall-clock seconds, set by finish.
    pub time_spent: u64,
    pub is_completed: bool,
    /// Percent of answered challenges graded correct, set by finish.
    pub accuracy: u32,
    pub speed_bonus: u64,
}

impl ContestAttempt {
    pub fn new(id: String, user_id: &str, contest_id: &str, now: DateTime<Utc>) -> Self {
        ContestAttempt {
            id,
            user_id: user_id.to_string(),
            contest_id: contest_id.to_string(),
            start_time: now,
            end_time: None,
            score: 0,
            answers: Vec::new(),
            time_spent: 0,
            is_completed: false,
            accuracy: 0,
            speed_bonus: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_completed
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    /// Seconds elapsed since start, clamped at zero for clock skew.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.start_time).num_seconds().max(0) as u64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    pub challenge_id: String,
    pub answer: String,
    pub is_correct: bool,
    /// Seconds the client spent on this question.
    pub time_spent: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitContestAnswerRequest {
    #[validate(length(min = 1, message = "Challenge id is required"))]
    pub challenge_id: String,

    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,

    pub time_spent: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitContestAnswerResponse {
    pub correct: bool,
    pub points_awarded: u32,
    pub running_score: u64,
    pub answered: usize,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Record of a correctly solved practice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProgress {
    pub user_id: String,
    pub challenge_id: String,
    pub completed: bool,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PracticeAnswerRequest {
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeAnswerResponse {
    pub correct: bool,
    pub points_awarded: u32,
    pub total_score: u64,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeType {
    MultipleChoice,
    Text,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single graded question. Owned by exactly one contest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Challenge {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: u32,
    pub difficulty: Difficulty,
    pub contest_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contest {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered question sequence.
    pub challenges: Vec<Challenge>,
    /// Minutes.
    pub time_limit: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub max_attempts: u32,
    pub created_by: String,
    pub is_public: bool,
}

impl Contest {
    pub fn time_limit_seconds(&self) -> u64 {
        u64::from(self.time_limit) * 60
    }

    pub fn challenge(&self, challenge_id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == challenge_id)
    }

    /// Client-facing shape; answers are only revealed to admins.
    pub fn view(&self, reveal_answers: bool) -> ContestView {
        ContestView {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            challenges: self
                .challenges
                .iter()
                .map(|c| ChallengeView::from_challenge(c, reveal_answers))
                .collect(),
            time_limit: self.time_limit,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            max_attempts: self.max_attempts,
            created_by: self.created_by.clone(),
            is_public: self.is_public,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeView {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    pub options: Vec<String>,
    pub points: u32,
    pub difficulty: Difficulty,
    pub contest_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl ChallengeView {
    fn from_challenge(challenge: &Challenge, reveal_answer: bool) -> Self {
        ChallengeView {
            id: challenge.id.clone(),
            question: challenge.question.clone(),
            kind: challenge.kind,
            options: challenge.options.clone(),
            points: challenge.points,
            difficulty: challenge.difficulty,
            contest_id: challenge.contest_id.clone(),
            correct_answer: reveal_answer.then(|| challenge.correct_answer.clone()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContestView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub challenges: Vec<ChallengeView>,
    pub time_limit: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub max_attempts: u32,
    pub created_by: String,
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListContestsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Request to create a contest (admin only). Challenges are added separately.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContestRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 1, message = "Time limit must be at least one minute"))]
    pub time_limit: u32,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[validate(range(min = 1, message = "At least one attempt must be allowed"))]
    pub max_attempts: u32,

    #[serde(default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

/// Mutable contest fields; anything left out stays as it is.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContestRequest {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Time limit must be at least one minute"))]
    pub time_limit: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1, message = "At least one attempt must be allowed"))]
    pub max_attempts: Option<u32>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddChallengeRequest {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,

    #[serde(rename = "type")]
    pub kind: ChallengeType,

    #[serde(default)]
    pub options: Vec<String>,

    #[validate(length(min = 1, message = "Correct answer is required"))]
    pub correct_answer: String,

    pub points: u32,

    pub difficulty: Difficulty,
}

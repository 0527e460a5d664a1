use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Row of the overall (cumulative score) leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub username: String,
    pub score: u64,
    pub join_date: NaiveDate,
}

/// Row of a per-contest leaderboard, built from the user's best completed attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContestLeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub username: String,
    pub attempt_id: String,
    pub score: u64,
    pub accuracy: u32,
    pub time_spent: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileStats {
    pub user_id: String,
    pub total_score: u64,
    /// 1-based position in the overall leaderboard.
    pub rank: Option<usize>,
    pub total_attempts: usize,
    pub average_score: u64,
    pub best_score: u64,
    pub total_time_spent: u64,
    pub average_accuracy: u32,
}

use crate::engine::ranking;
use crate::error::{ClubError, ClubResult};
use crate::models::leaderboard::{ContestLeaderboardEntry, LeaderboardEntry, ProfileStats};
use crate::store::SharedStore;

pub struct LeaderboardService {
    store: SharedStore,
}

impl LeaderboardService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn overall(&self) -> Vec<LeaderboardEntry> {
        let store = self.store.read().await;
        ranking::overall_leaderboard(store.users())
    }

    /// Empty for a contest nobody has completed, and for unknown or private
    /// contests.
    pub async fn contest(&self, contest_id: &str) -> Vec<ContestLeaderboardEntry> {
        let store = self.store.read().await;
        if !store.contest(contest_id).is_some_and(|c| c.is_public) {
            tracing::debug!(contest_id = %contest_id, "No public leaderboard for contest");
            return Vec::new();
        }
        let rows = ranking::contest_leaderboard(contest_id, store.attempts(), store.users());
        tracing::debug!(contest_id = %contest_id, rows = rows.len(), "Contest leaderboard built");
        rows
    }

    pub async fn profile_stats(&self, user_id: &str) -> ClubResult<ProfileStats> {
        let store = self.store.read().await;
        let user = store.user(user_id).ok_or(ClubError::NotFound("User"))?;
        Ok(ranking::profile_stats(&store, user))
    }
}

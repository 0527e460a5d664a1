//! In-memory repository for every club collection.
//!
//! The store is owned by [`crate::services::AppState`] behind a single
//! `RwLock`; nothing in the crate reaches it through globals. Collections are
//! kept in insertion order because ranking ties fall back to it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ClubError, ClubResult};
use crate::models::{
    Challenge, ChallengeType, Contest, ContestAttempt, Difficulty, Event, ForumReply, ForumTopic,
    User, UserProgress, UserRole,
};

pub type SharedStore = Arc<RwLock<ClubStore>>;

#[derive(Debug, Default)]
pub struct ClubStore {
    users: Vec<User>,
    contests: Vec<Contest>,
    attempts: Vec<ContestAttempt>,
    progress: Vec<UserProgress>,
    events: Vec<Event>,
    topics: Vec<ForumTopic>,
    /// Revoked `jti` mapped to the token's `exp` (unix seconds).
    revoked_tokens: HashMap<String, i64>,
}

impl ClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the demo club.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.seed_demo_data();
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    // ---- users ----

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// The caller must still exist for any authenticated operation.
    pub fn require_user(&self, user_id: &str) -> ClubResult<&User> {
        self.user(user_id).ok_or(ClubError::NotAuthenticated)
    }

    pub fn require_admin(&self, user_id: &str) -> ClubResult<&User> {
        let user = self.require_user(user_id)?;
        if !user.is_admin() {
            return Err(ClubError::AdminRequired);
        }
        Ok(user)
    }

    // ---- contests & challenges ----

    pub fn contests(&self) -> &[Contest] {
        &self.contests
    }

    pub fn contest(&self, contest_id: &str) -> Option<&Contest> {
        self.contests.iter().find(|c| c.id == contest_id)
    }

    pub fn contest_mut(&mut self, contest_id: &str) -> Option<&mut Contest> {
        self.contests.iter_mut().find(|c| c.id == contest_id)
    }

    pub fn insert_contest(&mut self, contest: Contest) {
        self.contests.push(contest);
    }

    /// Drops the contest together with its challenges. Attempts are kept.
    pub fn remove_contest(&mut self, contest_id: &str) -> Option<Contest> {
        let pos = self.contests.iter().position(|c| c.id == contest_id)?;
        Some(self.contests.remove(pos))
    }

    pub fn challenge(&self, challenge_id: &str) -> Option<&Challenge> {
        self.contests
            .iter()
            .flat_map(|c| c.challenges.iter())
            .find(|c| c.id == challenge_id)
    }

    // ---- attempts ----

    pub fn attempts(&self) -> &[ContestAttempt] {
        &self.attempts
    }

    pub fn attempt(&self, attempt_id: &str) -> Option<&ContestAttempt> {
        self.attempts.iter().find(|a| a.id == attempt_id)
    }

    pub fn attempt_mut(&mut self, attempt_id: &str) -> Option<&mut ContestAttempt> {
        self.attempts.iter_mut().find(|a| a.id == attempt_id)
    }

    pub fn insert_attempt(&mut self, attempt: ContestAttempt) {
        self.attempts.push(attempt);
    }

    pub fn attempts_for<'a>(
        &'a self,
        user_id: &'a str,
        contest_id: &'a str,
    ) -> impl Iterator<Item = &'a ContestAttempt> + 'a {
        self.attempts
            .iter()
            .filter(move |a| a.user_id == user_id && a.contest_id == contest_id)
    }

    // ---- practice progress ----

    pub fn record_progress(&mut self, progress: UserProgress) {
        self.progress.push(progress);
    }

    pub fn progress_for<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a UserProgress> {
        self.progress.iter().filter(move |p| p.user_id == user_id)
    }

    // ---- events ----

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event_mut(&mut self, event_id: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == event_id)
    }

    pub fn insert_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn remove_event(&mut self, event_id: &str) -> Option<Event> {
        let pos = self.events.iter().position(|e| e.id == event_id)?;
        Some(self.events.remove(pos))
    }

    // ---- forum ----

    pub fn topics(&self) -> &[ForumTopic] {
        &self.topics
    }

    pub fn topic(&self, topic_id: &str) -> Option<&ForumTopic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    pub fn topic_mut(&mut self, topic_id: &str) -> Option<&mut ForumTopic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }

    pub fn insert_topic(&mut self, topic: ForumTopic) {
        self.topics.push(topic);
    }

    // ---- access tokens ----

    /// Remember a revoked token until it would have expired anyway. Entries
    /// already past `now` are dropped on the way.
    pub fn revoke_token(&mut self, jti: &str, expires_at: i64, now: i64) {
        self.revoked_tokens.retain(|_, exp| *exp > now);
        if expires_at > now {
            self.revoked_tokens.insert(jti.to_string(), expires_at);
        }
    }

    pub fn is_token_revoked(&self, jti: &str) -> bool {
        self.revoked_tokens.contains_key(jti)
    }

    pub fn revoked_token_count(&self) -> usize {
        self.revoked_tokens.len()
    }

    /// Demo club: three members, one admin, two contests, one event and a
    /// pinned forum thread.
    pub fn seed_demo_data(&mut self) {
        let users = [
            ("1", "AIExplorer", "explorer@vaic.com", 150, (2024, 1, 15), Some("SV001")),
            ("2", "TechWizard", "wizard@vaic.com", 120, (2024, 1, 20), Some("SV002")),
            ("3", "DataMaster", "master@vaic.com", 180, (2024, 1, 10), Some("SV003")),
            ("admin", "Admin", "admin@vaic.com", 999, (2024, 1, 1), None),
        ];
        for (id, username, email, score, (y, m, d), student_id) in users {
            self.insert_user(User {
                id: id.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                score,
                join_date: date(y, m, d),
                role: if id == "admin" {
                    UserRole::Admin
                } else {
                    UserRole::User
                },
                student_id: student_id.map(str::to_string),
                avatar: None,
            });
        }

        let basics = vec![
            seed_challenge(
                "1",
                "contest1",
                "What does AI stand for?",
                ChallengeType::MultipleChoice,
                &[
                    "Artificial Intelligence",
                    "Automated Intelligence",
                    "Advanced Intelligence",
                    "Applied Intelligence",
                ],
                "Artificial Intelligence",
                10,
                Difficulty::Easy,
            ),
            seed_challenge(
                "2",
                "contest1",
                "Which algorithm is commonly used for image recognition?",
                ChallengeType::MultipleChoice,
                &[
                    "Linear Regression",
                    "Convolutional Neural Network",
                    "Decision Tree",
                    "K-Means",
                ],
                "Convolutional Neural Network",
                20,
                Difficulty::Medium,
            ),
            seed_challenge(
                "3",
                "contest1",
                "Explain the concept of overfitting in machine learning.",
                ChallengeType::Text,
                &[],
                "overfitting",
                30,
                Difficulty::Hard,
            ),
        ];
        let python = vec![
            seed_challenge(
                "4",
                "contest2",
                "Why is Python so widely used in AI?",
                ChallengeType::MultipleChoice,
                &[
                    "Easy to learn and use",
                    "Many AI libraries",
                    "Large community",
                    "All of the above",
                ],
                "All of the above",
                15,
                Difficulty::Easy,
            ),
            seed_challenge(
                "5",
                "contest2",
                "What is TensorFlow?",
                ChallengeType::Text,
                &[],
                "framework",
                25,
                Difficulty::Medium,
            ),
        ];

        self.insert_contest(Contest {
            id: "contest1".to_string(),
            title: "AI Fundamentals".to_string(),
            description: "Basic knowledge of artificial intelligence and machine learning"
                .to_string(),
            challenges: basics,
            time_limit: 30,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            is_active: true,
            max_attempts: 3,
            created_by: "admin".to_string(),
            is_public: true,
        });
        self.insert_contest(Contest {
            id: "contest2".to_string(),
            title: "Python for AI".to_string(),
            description: "Using Python in AI projects".to_string(),
            challenges: python,
            time_limit: 20,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            is_active: true,
            max_attempts: 2,
            created_by: "admin".to_string(),
            is_public: true,
        });

        let event_time = timestamp(2024, 1, 20, 10, 0);
        self.insert_event(Event {
            id: "1".to_string(),
            title: "Workshop: Introduction to Machine Learning".to_string(),
            content: "Free hands-on workshop for beginners: core ML concepts, popular \
                      algorithms, practice with Python and a Q&A session."
                .to_string(),
            author: "admin".to_string(),
            author_name: "Admin".to_string(),
            created_at: event_time,
            updated_at: event_time,
            is_published: true,
            tags: vec![
                "workshop".to_string(),
                "machine learning".to_string(),
                "beginner".to_string(),
            ],
        });

        let topic_time = timestamp(2024, 1, 18, 9, 0);
        self.insert_topic(ForumTopic {
            id: "1".to_string(),
            title: "The future of AI in education".to_string(),
            content: "AI is changing how we learn and teach. What benefits and challenges \
                      do you see?"
                .to_string(),
            author: "1".to_string(),
            author_name: "AIExplorer".to_string(),
            created_at: topic_time,
            updated_at: topic_time,
            replies: vec![ForumReply {
                id: "1".to_string(),
                content: "Personalised tutoring looks like the biggest win to me.".to_string(),
                author: "2".to_string(),
                author_name: "TechWizard".to_string(),
                created_at: timestamp(2024, 1, 18, 10, 30),
                topic_id: "1".to_string(),
            }],
            tags: vec!["AI".to_string(), "education".to_string(), "future".to_string()],
            is_pinned: true,
        });

        tracing::info!(
            users = self.users.len(),
            contests = self.contests.len(),
            "Seeded demo club data"
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_challenge(
    id: &str,
    contest_id: &str,
    question: &str,
    kind: ChallengeType,
    options: &[&str],
    correct_answer: &str,
    points: u32,
    difficulty: Difficulty,
) -> Challenge {
    Challenge {
        id: id.to_string(),
        question: question.to_string(),
        kind,
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct_answer.to_string(),
        points,
        difficulty,
        contest_id: contest_id.to_string(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_demo_club() {
        let store = ClubStore::seeded();
        assert_eq!(store.users().len(), 4);
        assert_eq!(store.contests().len(), 2);
        assert_eq!(store.contest("contest1").unwrap().challenges.len(), 3);
        assert_eq!(store.contest("contest2").unwrap().max_attempts, 2);
        assert!(store.user("admin").unwrap().is_admin());
        assert!(store.topic("1").unwrap().is_pinned);
    }

    #[test]
    fn challenge_lookup_spans_contests() {
        let store = ClubStore::seeded();
        assert_eq!(store.challenge("5").unwrap().contest_id, "contest2");
        assert!(store.challenge("missing").is_none());
    }

    #[test]
    fn removing_contest_drops_its_challenges() {
        let mut store = ClubStore::seeded();
        let removed = store.remove_contest("contest1").unwrap();
        assert_eq!(removed.challenges.len(), 3);
        assert!(store.challenge("1").is_none());
        assert!(store.challenge("4").is_some());
    }

    #[test]
    fn require_admin_distinguishes_roles() {
        let store = ClubStore::seeded();
        assert!(store.require_admin("admin").is_ok());
        assert!(matches!(
            store.require_admin("1"),
            Err(ClubError::AdminRequired)
        ));
        assert!(matches!(
            store.require_admin("ghost"),
            Err(ClubError::NotAuthenticated)
        ));
    }

    #[test]
    fn revoked_tokens_are_remembered() {
        let mut store = ClubStore::new();
        assert!(!store.is_token_revoked("jti-1"));
        store.revoke_token("jti-1", 2_000, 1_000);
        assert!(store.is_token_revoked("jti-1"));
    }

    #[test]
    fn expired_revocations_are_dropped() {
        let mut store = ClubStore::new();
        store.revoke_token("old", 1_500, 1_000);
        store.revoke_token("fresh", 5_000, 1_000);
        assert_eq!(store.revoked_token_count(), 2);

        // a later revocation sweeps tokens that have expired since
        store.revoke_token("newest", 9_000, 2_000);
        assert!(!store.is_token_revoked("old"));
        assert!(store.is_token_revoked("fresh"));
        assert!(store.is_token_revoked("newest"));

        // an already expired token is not worth remembering
        store.revoke_token("stale", 1_000, 2_000);
        assert!(!store.is_token_revoked("stale"));
        assert_eq!(store.revoked_token_count(), 2);
    }
}

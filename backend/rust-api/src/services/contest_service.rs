use chrono::Utc;

use crate::engine::{self, attempts, FinishTrigger};
use crate::error::{ClubError, ClubResult, Precondition};
use crate::metrics;
use crate::models::attempt::{SubmitContestAnswerRequest, SubmitContestAnswerResponse};
use crate::models::contest::{
    AddChallengeRequest, ContestView, CreateContestRequest, UpdateContestRequest,
};
use crate::models::progress::PracticeAnswerResponse;
use crate::models::{Challenge, Contest, ContestAttempt};
use crate::store::{ClubStore, SharedStore};

/// Contest catalogue, administration and the attempt lifecycle.
///
/// Every mutation runs its whole check-then-write sequence under the store's
/// write lock.
#[derive(Clone)]
pub struct ContestService {
    store: SharedStore,
}

impl ContestService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list_contests(
        &self,
        caller_id: &str,
        include_inactive: bool,
    ) -> ClubResult<Vec<ContestView>> {
        let store = self.store.read().await;
        let is_admin = store.require_user(caller_id)?.is_admin();
        let include_inactive = include_inactive && is_admin;

        Ok(store
            .contests()
            .iter()
            .filter(|c| c.is_active || include_inactive)
            .map(|c| c.view(is_admin))
            .collect())
    }

    pub async fn get_contest(&self, caller_id: &str, contest_id: &str) -> ClubResult<ContestView> {
        let store = self.store.read().await;
        let is_admin = store.require_user(caller_id)?.is_admin();
        store
            .contest(contest_id)
            .map(|c| c.view(is_admin))
            .ok_or(ClubError::NotFound("Contest"))
    }

    pub async fn create_contest(
        &self,
        admin_id: &str,
        req: CreateContestRequest,
    ) -> ClubResult<Contest> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        let contest = Contest {
            id: ClubStore::new_id(),
            title: req.title,
            description: req.description,
            challenges: Vec::new(),
            time_limit: req.time_limit,
            start_date: req.start_date,
            end_date: req.end_date,
            is_active: req.is_active,
            max_attempts: req.max_attempts,
            created_by: admin_id.to_string(),
            is_public: req.is_public,
        };
        store.insert_contest(contest.clone());

        tracing::info!(contest_id = %contest.id, created_by = %admin_id, "Contest created");
        Ok(contest)
    }

    /// Append a challenge to the end of the contest's sequence.
    pub async fn add_challenge(
        &self,
        admin_id: &str,
        contest_id: &str,
        req: AddChallengeRequest,
    ) -> ClubResult<Challenge> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        let contest = store
            .contest_mut(contest_id)
            .ok_or(ClubError::NotFound("Contest"))?;
        let challenge = Challenge {
            id: ClubStore::new_id(),
            question: req.question,
            kind: req.kind,
            options: req.options,
            correct_answer: req.correct_answer,
            points: req.points,
            difficulty: req.difficulty,
            contest_id: contest_id.to_string(),
        };
        contest.challenges.push(challenge.clone());

        tracing::info!(
            contest_id = %contest_id,
            challenge_id = %challenge.id,
            position = contest.challenges.len(),
            "Challenge added"
        );
        Ok(challenge)
    }

    pub async fn update_contest(
        &self,
        admin_id: &str,
        contest_id: &str,
        req: UpdateContestRequest,
    ) -> ClubResult<Contest> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        let contest = store
            .contest_mut(contest_id)
            .ok_or(ClubError::NotFound("Contest"))?;
        if let Some(title) = req.title {
            contest.title = title;
        }
        if let Some(description) = req.description {
            contest.description = description;
        }
        if let Some(time_limit) = req.time_limit {
            contest.time_limit = time_limit;
        }
        if let Some(start_date) = req.start_date {
            contest.start_date = start_date;
        }
        if let Some(end_date) = req.end_date {
            contest.end_date = end_date;
        }
        if let Some(is_active) = req.is_active {
            contest.is_active = is_active;
        }
        if let Some(max_attempts) = req.max_attempts {
            contest.max_attempts = max_attempts;
        }
        if let Some(is_public) = req.is_public {
            contest.is_public = is_public;
        }

        tracing::info!(contest_id = %contest_id, "Contest updated");
        Ok(contest.clone())
    }

    /// Remove a contest with its challenges. Attempts stay on record.
    pub async fn delete_contest(&self, admin_id: &str, contest_id: &str) -> ClubResult<()> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        let removed = store
            .remove_contest(contest_id)
            .ok_or(ClubError::NotFound("Contest"))?;
        tracing::info!(
            contest_id = %contest_id,
            challenges = removed.challenges.len(),
            "Contest deleted"
        );
        Ok(())
    }

    pub async fn start_attempt(
        &self,
        user_id: &str,
        contest_id: &str,
    ) -> ClubResult<ContestAttempt> {
        let mut store = self.store.write().await;

        match attempts::start_attempt(&mut store, user_id, contest_id, Utc::now()) {
            Ok(attempt) => {
                metrics::record_attempt_started();
                tracing::info!(
                    attempt_id = %attempt.id,
                    user_id = %user_id,
                    contest_id = %contest_id,
                    "Contest attempt started"
                );
                Ok(attempt)
            }
            Err(e) => {
                if matches!(e, ClubError::PreconditionFailed(_)) {
                    metrics::record_attempt_rejected();
                }
                tracing::warn!(
                    user_id = %user_id,
                    contest_id = %contest_id,
                    error = %e,
                    "Contest attempt refused"
                );
                Err(e)
            }
        }
    }

    pub async fn submit_answer(
        &self,
        user_id: &str,
        attempt_id: &str,
        req: SubmitContestAnswerRequest,
    ) -> ClubResult<SubmitContestAnswerResponse> {
        let mut store = self.store.write().await;

        let outcome = attempts::submit_answer(
            &mut store,
            user_id,
            attempt_id,
            &req.challenge_id,
            &req.answer,
            req.time_spent.unwrap_or(0),
        )?;
        metrics::record_answer("contest", outcome.correct);

        tracing::debug!(
            attempt_id = %attempt_id,
            challenge_id = %req.challenge_id,
            correct = outcome.correct,
            running_score = outcome.running_score,
            "Contest answer recorded"
        );

        Ok(SubmitContestAnswerResponse {
            correct: outcome.correct,
            points_awarded: outcome.points_awarded,
            running_score: outcome.running_score,
            answered: outcome.answered,
        })
    }

    pub async fn finish_attempt(
        &self,
        user_id: &str,
        attempt_id: &str,
    ) -> ClubResult<ContestAttempt> {
        self.finish(FinishTrigger::User(user_id), attempt_id).await
    }

    /// Close an attempt whose clock ran out. Used by the timer stream and the
    /// background sweep.
    pub async fn expire_attempt(&self, attempt_id: &str) -> ClubResult<ContestAttempt> {
        self.finish(FinishTrigger::TimeLimit, attempt_id).await
    }

    async fn finish(
        &self,
        trigger: FinishTrigger<'_>,
        attempt_id: &str,
    ) -> ClubResult<ContestAttempt> {
        let mut store = self.store.write().await;

        let finished = attempts::finish_attempt(&mut store, trigger, attempt_id, Utc::now())?;
        metrics::record_attempt_completed(finished.speed_bonus);

        tracing::info!(
            attempt_id = %finished.id,
            user_id = %finished.user_id,
            trigger = ?trigger,
            score = finished.score,
            accuracy = finished.accuracy,
            speed_bonus = finished.speed_bonus,
            time_spent = finished.time_spent,
            "Contest attempt finished"
        );
        Ok(finished)
    }

    pub async fn current_attempt(
        &self,
        user_id: &str,
        contest_id: &str,
    ) -> ClubResult<ContestAttempt> {
        let store = self.store.read().await;
        attempts::current_attempt(&store, user_id, contest_id)
            .cloned()
            .ok_or(ClubError::NotFound("Attempt"))
    }

    pub async fn user_attempts(
        &self,
        user_id: &str,
        contest_id: &str,
    ) -> ClubResult<Vec<ContestAttempt>> {
        let store = self.store.read().await;
        store.require_user(user_id)?;
        Ok(attempts::completed_attempts(&store, user_id, contest_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Visible to its owner and to admins.
    pub async fn get_attempt(&self, caller_id: &str, attempt_id: &str) -> ClubResult<ContestAttempt> {
        let store = self.store.read().await;
        let caller = store.require_user(caller_id)?;
        let attempt = store
            .attempt(attempt_id)
            .ok_or(ClubError::NotFound("Attempt"))?;

        if attempt.user_id != caller.id && !caller.is_admin() {
            return Err(ClubError::PreconditionFailed(Precondition::NotAttemptOwner));
        }
        Ok(attempt.clone())
    }

    /// Attempt plus its contest time limit in seconds, for the timer stream.
    pub async fn attempt_clock(
        &self,
        caller_id: &str,
        attempt_id: &str,
    ) -> ClubResult<(ContestAttempt, u64)> {
        let attempt = self.get_attempt(caller_id, attempt_id).await?;
        let store = self.store.read().await;
        let limit = attempts::time_limit_for(&store, &attempt);
        Ok((attempt, limit))
    }

    pub async fn practice_answer(
        &self,
        user_id: &str,
        challenge_id: &str,
        answer: &str,
    ) -> ClubResult<PracticeAnswerResponse> {
        let mut store = self.store.write().await;

        let outcome =
            engine::submit_practice_answer(&mut store, user_id, challenge_id, answer, Utc::now())?;
        metrics::record_answer("practice", outcome.correct);

        tracing::debug!(
            user_id = %user_id,
            challenge_id = %challenge_id,
            correct = outcome.correct,
            "Practice answer graded"
        );

        Ok(PracticeAnswerResponse {
            correct: outcome.correct,
            points_awarded: outcome.points_awarded,
            total_score: outcome.total_score,
        })
    }
}

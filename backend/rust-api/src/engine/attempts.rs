//! Attempt lifecycle: `start` opens an attempt, `submit_answer` records
//! graded answers while it is open, `finish` closes it exactly once.

use chrono::{DateTime, Utc};

use super::grading::grade;
use super::scoring::{final_score, FALLBACK_TIME_LIMIT_SECONDS};
use crate::error::{ClubError, ClubResult, Precondition};
use crate::models::{AnswerRecord, ContestAttempt};
use crate::store::ClubStore;

/// Who is closing an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishTrigger<'a> {
    /// The owner submitted early or reached the last question.
    User(&'a str),
    /// The contest clock ran out.
    TimeLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub points_awarded: u32,
    pub running_score: u64,
    pub answered: usize,
}

pub fn start_attempt(
    store: &mut ClubStore,
    user_id: &str,
    contest_id: &str,
    now: DateTime<Utc>,
) -> ClubResult<ContestAttempt> {
    store.require_user(user_id)?;
    let contest = store
        .contest(contest_id)
        .ok_or(ClubError::NotFound("Contest"))?;

    let mut completed = 0u32;
    for attempt in store.attempts_for(user_id, contest_id) {
        if attempt.is_open() {
            return Err(ClubError::PreconditionFailed(
                Precondition::AttemptAlreadyOpen,
            ));
        }
        completed += 1;
    }
    if completed >= contest.max_attempts {
        return Err(ClubError::PreconditionFailed(
            Precondition::AttemptLimitReached,
        ));
    }

    let attempt = ContestAttempt::new(ClubStore::new_id(), user_id, contest_id, now);
    store.insert_attempt(attempt.clone());
    Ok(attempt)
}

/// Grade and record one answer. A second answer to the same challenge
/// replaces the first, and the running score follows the latest grading.
pub fn submit_answer(
    store: &mut ClubStore,
    user_id: &str,
    attempt_id: &str,
    challenge_id: &str,
    answer: &str,
    time_spent: u64,
) -> ClubResult<AnswerOutcome> {
    let attempt = open_attempt_of(store, user_id, attempt_id)?;

    let contest = store
        .contest(&attempt.contest_id)
        .ok_or(ClubError::NotFound("Contest"))?;
    let challenge = match contest.challenge(challenge_id) {
        Some(challenge) => challenge,
        None if store.challenge(challenge_id).is_some() => {
            return Err(ClubError::PreconditionFailed(
                Precondition::ChallengeNotInContest,
            ));
        }
        None => return Err(ClubError::NotFound("Challenge")),
    };

    let correct = grade(challenge, answer);
    let points = challenge.points;

    let attempt = store
        .attempt_mut(attempt_id)
        .ok_or(ClubError::NotFound("Attempt"))?;

    if let Some(pos) = attempt
        .answers
        .iter()
        .position(|a| a.challenge_id == challenge_id)
    {
        let previous = attempt.answers.remove(pos);
        if previous.is_correct {
            attempt.score = attempt.score.saturating_sub(u64::from(points));
        }
    }

    attempt.answers.push(AnswerRecord {
        challenge_id: challenge_id.to_string(),
        answer: answer.to_string(),
        is_correct: correct,
        time_spent,
    });
    if correct {
        attempt.score += u64::from(points);
    }

    Ok(AnswerOutcome {
        correct,
        points_awarded: if correct { points } else { 0 },
        running_score: attempt.score,
        answered: attempt.answers.len(),
    })
}

/// Close an attempt: stamp the end time, compute accuracy and speed bonus,
/// and credit the final score to its owner.
///
/// Every check runs before the first write, so a refused finish leaves the
/// attempt and the user untouched. A completed attempt is never finished again.
pub fn finish_attempt(
    store: &mut ClubStore,
    trigger: FinishTrigger<'_>,
    attempt_id: &str,
    now: DateTime<Utc>,
) -> ClubResult<ContestAttempt> {
    let attempt = store
        .attempt(attempt_id)
        .ok_or(ClubError::NotFound("Attempt"))?;
    if let FinishTrigger::User(user_id) = trigger {
        if attempt.user_id != user_id {
            return Err(ClubError::PreconditionFailed(Precondition::NotAttemptOwner));
        }
    }
    if attempt.is_completed {
        return Err(ClubError::PreconditionFailed(
            Precondition::AttemptAlreadyCompleted,
        ));
    }
    if store.user(&attempt.user_id).is_none() {
        return Err(ClubError::NotFound("User"));
    }

    let time_limit = time_limit_for(store, attempt);
    let time_spent = attempt.elapsed_seconds(now);
    let result = final_score(
        attempt.score,
        attempt.correct_count(),
        attempt.answers.len(),
        time_limit,
        time_spent,
    );
    let owner = attempt.user_id.clone();

    let attempt = store
        .attempt_mut(attempt_id)
        .ok_or(ClubError::NotFound("Attempt"))?;
    attempt.end_time = Some(now);
    attempt.time_spent = time_spent;
    attempt.accuracy = result.accuracy;
    attempt.speed_bonus = result.speed_bonus;
    attempt.score = result.score;
    attempt.is_completed = true;
    let finished = attempt.clone();

    if let Some(user) = store.user_mut(&owner) {
        user.score += finished.score;
    }

    Ok(finished)
}

/// Contest limit in seconds, or the fallback when the contest was deleted.
pub fn time_limit_for(store: &ClubStore, attempt: &ContestAttempt) -> u64 {
    store
        .contest(&attempt.contest_id)
        .map(|c| c.time_limit_seconds())
        .unwrap_or(FALLBACK_TIME_LIMIT_SECONDS)
}

pub fn current_attempt<'a>(
    store: &'a ClubStore,
    user_id: &'a str,
    contest_id: &'a str,
) -> Option<&'a ContestAttempt> {
    store
        .attempts_for(user_id, contest_id)
        .find(|a| a.is_open())
}

pub fn completed_attempts<'a>(
    store: &'a ClubStore,
    user_id: &'a str,
    contest_id: &'a str,
) -> Vec<&'a ContestAttempt> {
    store
        .attempts_for(user_id, contest_id)
        .filter(|a| a.is_completed)
        .collect()
}

/// Open attempts whose contest clock has run out at `now`.
pub fn expired_attempt_ids(store: &ClubStore, now: DateTime<Utc>) -> Vec<String> {
    store
        .attempts()
        .iter()
        .filter(|a| a.is_open() && a.elapsed_seconds(now) >= time_limit_for(store, a))
        .map(|a| a.id.clone())
        .collect()
}

fn open_attempt_of<'a>(
    store: &'a ClubStore,
    user_id: &str,
    attempt_id: &str,
) -> ClubResult<&'a ContestAttempt> {
    let attempt = store
        .attempt(attempt_id)
        .ok_or(ClubError::NotFound("Attempt"))?;
    if attempt.user_id != user_id {
        return Err(ClubError::PreconditionFailed(Precondition::NotAttemptOwner));
    }
    if attempt.is_completed {
        return Err(ClubError::PreconditionFailed(
            Precondition::AttemptAlreadyCompleted,
        ));
    }
    Ok(attempt)
}

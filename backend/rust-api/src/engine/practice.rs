use chrono::{DateTime, Utc};

use super::grading::grade;
use crate::error::{ClubError, ClubResult};
use crate::models::UserProgress;
use crate::store::ClubStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeOutcome {
    pub correct: bool,
    pub points_awarded: u32,
    pub total_score: u64,
}

/// Answer a single challenge outside of any attempt.
///
/// A correct answer credits the challenge's points to the user and records
/// progress. Repeating a correct answer credits it again.
pub fn submit_practice_answer(
    store: &mut ClubStore,
    user_id: &str,
    challenge_id: &str,
    answer: &str,
    now: DateTime<Utc>,
) -> ClubResult<PracticeOutcome> {
    store.require_user(user_id)?;
    let challenge = store
        .challenge(challenge_id)
        .ok_or(ClubError::NotFound("Challenge"))?;
    let correct = grade(challenge, answer);
    let points = challenge.points;

    if correct {
        store.record_progress(UserProgress {
            user_id: user_id.to_string(),
            challenge_id: challenge_id.to_string(),
            completed: true,
            score: points,
            completed_at: now,
        });
    }

    let user = store.user_mut(user_id).ok_or(ClubError::NotAuthenticated)?;
    if correct {
        user.score += u64::from(points);
    }

    Ok(PracticeOutcome {
        correct,
        points_awarded: if correct { points } else { 0 },
        total_score: user.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_credits_points_and_records_progress() {
        let mut store = ClubStore::seeded();
        let outcome =
            submit_practice_answer(&mut store, "2", "2", "Convolutional Neural Network", Utc::now())
                .unwrap();

        assert!(outcome.correct);
        assert_eq!(outcome.points_awarded, 20);
        assert_eq!(outcome.total_score, 140);
        assert_eq!(store.progress_for("2").count(), 1);
    }

    #[test]
    fn wrong_answer_changes_nothing() {
        let mut store = ClubStore::seeded();
        let outcome = submit_practice_answer(&mut store, "2", "5", "a snake", Utc::now()).unwrap();

        assert!(!outcome.correct);
        assert_eq!(outcome.total_score, 120);
        assert_eq!(store.progress_for("2").count(), 0);
    }

    #[test]
    fn repeated_correct_answer_awards_again() {
        let mut store = ClubStore::seeded();
        for _ in 0..2 {
            submit_practice_answer(&mut store, "1", "5", "A Framework by Google", Utc::now())
                .unwrap();
        }
        assert_eq!(store.user("1").unwrap().score, 200);
        assert_eq!(store.progress_for("1").count(), 2);
    }

    #[test]
    fn unknown_challenge_is_not_found() {
        let mut store = ClubStore::seeded();
        assert!(matches!(
            submit_practice_answer(&mut store, "1", "nope", "x", Utc::now()),
            Err(ClubError::NotFound("Challenge"))
        ));
    }
}

//! Leaderboards, computed from stored state on every read.

use std::cmp::Ordering;

use crate::models::leaderboard::{ContestLeaderboardEntry, LeaderboardEntry, ProfileStats};
use crate::models::{ContestAttempt, User};
use crate::store::ClubStore;

/// All users by cumulative score, highest first. Equal scores go to the
/// earlier member; same-day joins keep registration order.
pub fn overall_leaderboard(users: &[User]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.join_date.cmp(&b.join_date))
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, user)| LeaderboardEntry {
            rank: i + 1,
            user_id: user.id.clone(),
            username: user.username.clone(),
            score: user.score,
            join_date: user.join_date,
        })
        .collect()
}

/// Score descending, then accuracy descending, then time spent ascending.
pub fn compare_contest_rows(
    a: &ContestLeaderboardEntry,
    b: &ContestLeaderboardEntry,
) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.accuracy.cmp(&a.accuracy))
        .then_with(|| a.time_spent.cmp(&b.time_spent))
}

/// Best completed attempt per user for one contest.
///
/// A later attempt only replaces the kept one with a strictly higher score,
/// so on equal scores the earliest attempt stands. Attempts of users that no
/// longer exist are skipped.
pub fn contest_leaderboard(
    contest_id: &str,
    attempts: &[ContestAttempt],
    users: &[User],
) -> Vec<ContestLeaderboardEntry> {
    let mut best: Vec<&ContestAttempt> = Vec::new();
    for attempt in attempts
        .iter()
        .filter(|a| a.contest_id == contest_id && a.is_completed)
    {
        match best.iter_mut().find(|kept| kept.user_id == attempt.user_id) {
            Some(kept) => {
                if attempt.score > kept.score {
                    *kept = attempt;
                }
            }
            None => best.push(attempt),
        }
    }

    let mut rows: Vec<ContestLeaderboardEntry> = best
        .into_iter()
        .filter_map(|attempt| {
            let user = users.iter().find(|u| u.id == attempt.user_id)?;
            Some(ContestLeaderboardEntry {
                rank: 0,
                user_id: user.id.clone(),
                username: user.username.clone(),
                attempt_id: attempt.id.clone(),
                score: attempt.score,
                accuracy: attempt.accuracy,
                time_spent: attempt.time_spent,
            })
        })
        .collect();

    rows.sort_by(compare_contest_rows);
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// Summary of a member's completed contest attempts.
pub fn profile_stats(store: &ClubStore, user: &User) -> ProfileStats {
    let completed: Vec<&ContestAttempt> = store
        .attempts()
        .iter()
        .filter(|a| a.user_id == user.id && a.is_completed)
        .collect();

    let total_attempts = completed.len();
    let score_sum: u64 = completed.iter().map(|a| a.score).sum();
    let accuracy_sum: u64 = completed.iter().map(|a| u64::from(a.accuracy)).sum();

    let rank = overall_leaderboard(store.users())
        .iter()
        .find(|row| row.user_id == user.id)
        .map(|row| row.rank);

    ProfileStats {
        user_id: user.id.clone(),
        total_score: user.score,
        rank,
        total_attempts,
        average_score: rounded_mean(score_sum, total_attempts),
        best_score: completed.iter().map(|a| a.score).max().unwrap_or(0),
        total_time_spent: completed.iter().map(|a| a.time_spent).sum(),
        average_accuracy: rounded_mean(accuracy_sum, total_attempts) as u32,
    }
}

fn rounded_mean(sum: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::{NaiveDate, Utc};

    fn user(id: &str, score: u64, joined: (i32, u32, u32)) -> User {
        User {
            id: id.to_string(),
            username: format!("user-{}", id),
            email: format!("{}@club.test", id),
            score,
            join_date: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2).unwrap(),
            role: UserRole::User,
            student_id: None,
            avatar: None,
        }
    }

    fn done(id: &str, user_id: &str, score: u64, accuracy: u32, time_spent: u64) -> ContestAttempt {
        let mut attempt = ContestAttempt::new(id.to_string(), user_id, "c1", Utc::now());
        attempt.score = score;
        attempt.accuracy = accuracy;
        attempt.time_spent = time_spent;
        attempt.is_completed = true;
        attempt
    }

    #[test]
    fn overall_orders_by_score_then_join_date() {
        let users = vec![
            user("late", 100, (2024, 3, 1)),
            user("top", 300, (2024, 2, 1)),
            user("early", 100, (2024, 1, 1)),
        ];

        let board = overall_leaderboard(&users);
        let ids: Vec<&str> = board.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["top", "early", "late"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn seeded_overall_board() {
        let store = ClubStore::seeded();
        let board = overall_leaderboard(store.users());
        let ids: Vec<&str> = board.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["admin", "3", "1", "2"]);
    }

    #[test]
    fn accuracy_breaks_score_ties() {
        let users = vec![user("a", 0, (2024, 1, 1)), user("b", 0, (2024, 1, 1))];
        let attempts = vec![done("x", "a", 50, 90, 100), done("y", "b", 50, 95, 300)];

        let board = contest_leaderboard("c1", &attempts, &users);
        assert_eq!(board[0].user_id, "b");
        assert_eq!(board[1].user_id, "a");
    }

    #[test]
    fn faster_run_breaks_full_ties() {
        let users = vec![user("a", 0, (2024, 1, 1)), user("b", 0, (2024, 1, 1))];
        let attempts = vec![done("x", "a", 50, 90, 400), done("y", "b", 50, 90, 120)];

        let board = contest_leaderboard("c1", &attempts, &users);
        assert_eq!(board[0].user_id, "b");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].time_spent, 400);
    }

    #[test]
    fn keeps_best_attempt_per_user_and_earliest_on_tie() {
        let users = vec![user("a", 0, (2024, 1, 1))];
        let attempts = vec![
            done("first", "a", 40, 50, 100),
            done("better", "a", 60, 70, 200),
            done("tie", "a", 60, 100, 10),
            done("worse", "a", 10, 10, 10),
        ];

        let board = contest_leaderboard("c1", &attempts, &users);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].attempt_id, "better");
        assert_eq!(board[0].score, 60);
        assert_eq!(board[0].accuracy, 70);
    }

    #[test]
    fn ignores_open_attempts_other_contests_and_unknown_users() {
        let users = vec![user("a", 0, (2024, 1, 1))];
        let mut open = done("open", "a", 99, 100, 1);
        open.is_completed = false;
        let mut elsewhere = done("elsewhere", "a", 99, 100, 1);
        elsewhere.contest_id = "c2".to_string();
        let attempts = vec![open, elsewhere, done("ghost", "nobody", 80, 100, 1)];

        assert!(contest_leaderboard("c1", &attempts, &users).is_empty());
    }

    #[test]
    fn profile_stats_summarise_completed_attempts() {
        let mut store = ClubStore::seeded();
        store.insert_attempt(done("p1", "2", 40, 50, 600));
        store.insert_attempt(done("p2", "2", 61, 75, 300));
        let mut open = done("p3", "2", 500, 100, 1);
        open.is_completed = false;
        store.insert_attempt(open);

        let user = store.user("2").unwrap().clone();
        let stats = profile_stats(&store, &user);

        assert_eq!(stats.total_attempts, 2);
        assert_eq!(stats.best_score, 61);
        assert_eq!(stats.average_score, 51);
        assert_eq!(stats.average_accuracy, 63);
        assert_eq!(stats.total_time_spent, 900);
        assert_eq!(stats.rank, Some(4));
    }

    #[test]
    fn profile_stats_without_attempts() {
        let store = ClubStore::seeded();
        let user = store.user("3").unwrap().clone();
        let stats = profile_stats(&store, &user);
        assert_eq!(stats.total_attempts, 0);
        assert_eq!(stats.average_score, 0);
        assert_eq!(stats.rank, Some(2));
    }
}

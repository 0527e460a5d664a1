/// Time limit used when the attempt's contest no longer exists.
pub const FALLBACK_TIME_LIMIT_SECONDS: u64 = 1800;

/// Percent of answered challenges that were correct, rounded half up.
/// Zero answers yield zero accuracy.
pub fn accuracy_percent(correct: usize, answered: usize) -> u32 {
    if answered == 0 {
        return 0;
    }
    ((correct as f64 / answered as f64) * 100.0).round() as u32
}

/// `floor(max(0, (limit - spent) / limit) * accuracy * 0.5)`, computed in
/// integers so identical inputs always give the identical bonus.
pub fn speed_bonus(time_limit_seconds: u64, time_spent: u64, accuracy: u32) -> u64 {
    if time_limit_seconds == 0 {
        return 0;
    }
    let remaining = time_limit_seconds.saturating_sub(time_spent);
    remaining * u64::from(accuracy) / (2 * time_limit_seconds)
}

/// Figures written onto an attempt when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub accuracy: u32,
    pub speed_bonus: u64,
    pub score: u64,
}

pub fn final_score(
    raw_score: u64,
    correct: usize,
    answered: usize,
    time_limit_seconds: u64,
    time_spent: u64,
) -> FinalScore {
    let accuracy = accuracy_percent(correct, answered);
    let bonus = speed_bonus(time_limit_seconds, time_spent, accuracy);
    FinalScore {
        accuracy,
        speed_bonus: bonus,
        score: raw_score + bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 8), 13);
        assert_eq!(accuracy_percent(4, 5), 80);
        assert_eq!(accuracy_percent(3, 3), 100);
    }

    #[test]
    fn half_time_at_eighty_percent_earns_twenty() {
        assert_eq!(speed_bonus(1800, 900, 80), 20);
    }

    #[test]
    fn overtime_earns_nothing() {
        assert_eq!(speed_bonus(1800, 2000, 100), 0);
        assert_eq!(speed_bonus(1800, 1800, 100), 0);
    }

    #[test]
    fn bonus_is_floored() {
        // ratio 0.9, accuracy 33 -> 14.85
        assert_eq!(speed_bonus(1000, 100, 33), 14);
    }

    #[test]
    fn instant_perfect_run_earns_fifty() {
        assert_eq!(speed_bonus(1200, 0, 100), 50);
    }

    #[test]
    fn zero_accuracy_earns_no_bonus() {
        assert_eq!(speed_bonus(1800, 0, 0), 0);
    }

    #[test]
    fn final_score_folds_in_bonus() {
        let result = final_score(30, 1, 2, 1800, 900);
        assert_eq!(result.accuracy, 50);
        assert_eq!(result.speed_bonus, 12);
        assert_eq!(result.score, 42);
    }

    #[test]
    fn nothing_answered_keeps_raw_score() {
        let result = final_score(0, 0, 0, 1800, 10);
        assert_eq!(
            result,
            FinalScore {
                accuracy: 0,
                speed_bonus: 0,
                score: 0
            }
        );
    }
}

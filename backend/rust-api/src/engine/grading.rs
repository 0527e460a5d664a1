use crate::models::{Challenge, ChallengeType};

/// Grade a submission against a challenge.
///
/// Multiple-choice answers must match the stored option exactly. Free-text
/// answers are correct when they contain the expected keyword, ignoring case.
pub fn grade(challenge: &Challenge, submitted: &str) -> bool {
    match challenge.kind {
        ChallengeType::MultipleChoice => submitted == challenge.correct_answer,
        ChallengeType::Text => submitted
            .to_lowercase()
            .contains(&challenge.correct_answer.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn challenge(kind: ChallengeType, correct: &str) -> Challenge {
        Challenge {
            id: "c".to_string(),
            question: "q".to_string(),
            kind,
            options: Vec::new(),
            correct_answer: correct.to_string(),
            points: 10,
            difficulty: Difficulty::Easy,
            contest_id: "contest".to_string(),
        }
    }

    #[test]
    fn multiple_choice_requires_exact_match() {
        let c = challenge(ChallengeType::MultipleChoice, "Artificial Intelligence");
        assert!(grade(&c, "Artificial Intelligence"));
        assert!(!grade(&c, "artificial intelligence"));
        assert!(!grade(&c, "Artificial Intelligence "));
    }

    #[test]
    fn text_accepts_keyword_anywhere_ignoring_case() {
        let c = challenge(ChallengeType::Text, "overfitting");
        assert!(grade(&c, "It's called overfitting of the model"));
        assert!(grade(&c, "OVERFITTING"));
        assert!(!grade(&c, "underfitting"));
    }

    #[test]
    fn text_keyword_case_is_ignored_too() {
        let c = challenge(ChallengeType::Text, "Framework");
        assert!(grade(&c, "an open source ML framework"));
    }
}

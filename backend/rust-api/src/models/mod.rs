pub mod attempt;
pub mod contest;
pub mod event;
pub mod forum;
pub mod leaderboard;
pub mod progress;
pub mod timer;
pub mod user;

pub use attempt::{AnswerRecord, ContestAttempt};
pub use contest::{Challenge, ChallengeType, Contest, Difficulty};
pub use event::Event;
pub use forum::{ForumReply, ForumTopic};
pub use progress::UserProgress;
pub use user::{User, UserRole};

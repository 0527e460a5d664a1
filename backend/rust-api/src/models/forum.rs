use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForumTopic {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    /// Bumped by every reply.
    pub updated_at: DateTime<Utc>,
    pub replies: Vec<ForumReply>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForumReply {
    pub id: String,
    pub content: String,
    pub author: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub topic_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRequest {
    #[validate(length(min = 1, message = "Reply content is required"))]
    pub content: String,
}

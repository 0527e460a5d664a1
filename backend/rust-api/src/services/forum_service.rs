use chrono::Utc;

use crate::error::{ClubError, ClubResult};
use crate::models::forum::{CreateTopicRequest, ReplyRequest};
use crate::models::{ForumReply, ForumTopic};
use crate::store::{ClubStore, SharedStore};

pub struct ForumService {
    store: SharedStore,
}

impl ForumService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Pinned topics first, then most recently active.
    pub async fn list_topics(&self) -> Vec<ForumTopic> {
        let store = self.store.read().await;
        let mut topics = store.topics().to_vec();
        topics.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        topics
    }

    pub async fn get_topic(&self, topic_id: &str) -> ClubResult<ForumTopic> {
        let store = self.store.read().await;
        store
            .topic(topic_id)
            .cloned()
            .ok_or(ClubError::NotFound("Topic"))
    }

    pub async fn create_topic(
        &self,
        user_id: &str,
        req: CreateTopicRequest,
    ) -> ClubResult<ForumTopic> {
        let mut store = self.store.write().await;
        let author_name = store.require_user(user_id)?.username.clone();

        let now = Utc::now();
        let topic = ForumTopic {
            id: ClubStore::new_id(),
            title: req.title,
            content: req.content,
            author: user_id.to_string(),
            author_name,
            created_at: now,
            updated_at: now,
            replies: Vec::new(),
            tags: req.tags,
            is_pinned: false,
        };
        store.insert_topic(topic.clone());

        tracing::info!(topic_id = %topic.id, author = %user_id, "Forum topic created");
        Ok(topic)
    }

    pub async fn reply(
        &self,
        user_id: &str,
        topic_id: &str,
        req: ReplyRequest,
    ) -> ClubResult<ForumReply> {
        let mut store = self.store.write().await;
        let author_name = store.require_user(user_id)?.username.clone();

        let topic = store
            .topic_mut(topic_id)
            .ok_or(ClubError::NotFound("Topic"))?;
        let now = Utc::now();
        let reply = ForumReply {
            id: ClubStore::new_id(),
            content: req.content,
            author: user_id.to_string(),
            author_name,
            created_at: now,
            topic_id: topic_id.to_string(),
        };
        topic.replies.push(reply.clone());
        topic.updated_at = now;

        tracing::info!(topic_id = %topic_id, reply_id = %reply.id, "Forum reply added");
        Ok(reply)
    }

    pub async fn toggle_pin(&self, admin_id: &str, topic_id: &str) -> ClubResult<ForumTopic> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        let topic = store
            .topic_mut(topic_id)
            .ok_or(ClubError::NotFound("Topic"))?;
        topic.is_pinned = !topic.is_pinned;

        tracing::info!(topic_id = %topic_id, pinned = topic.is_pinned, "Forum topic pin toggled");
        Ok(topic.clone())
    }
}

use chrono::Utc;

use crate::error::{ClubError, ClubResult};
use crate::models::event::{CreateEventRequest, UpdateEventRequest};
use crate::models::Event;
use crate::store::{ClubStore, SharedStore};

pub struct EventService {
    store: SharedStore,
}

impl EventService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Newest first. Drafts are only listed for admins.
    pub async fn list_events(&self, include_drafts: bool) -> Vec<Event> {
        let store = self.store.read().await;
        let mut events: Vec<Event> = store
            .events()
            .iter()
            .filter(|e| e.is_published || include_drafts)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events
    }

    pub async fn create_event(&self, admin_id: &str, req: CreateEventRequest) -> ClubResult<Event> {
        let mut store = self.store.write().await;
        let author_name = store.require_admin(admin_id)?.username.clone();

        let now = Utc::now();
        let event = Event {
            id: ClubStore::new_id(),
            title: req.title,
            content: req.content,
            author: admin_id.to_string(),
            author_name,
            created_at: now,
            updated_at: now,
            is_published: req.is_published,
            tags: req.tags,
        };
        store.insert_event(event.clone());

        tracing::info!(event_id = %event.id, published = event.is_published, "Event created");
        Ok(event)
    }

    pub async fn update_event(
        &self,
        admin_id: &str,
        event_id: &str,
        req: UpdateEventRequest,
    ) -> ClubResult<Event> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        let event = store
            .event_mut(event_id)
            .ok_or(ClubError::NotFound("Event"))?;
        if let Some(title) = req.title {
            event.title = title;
        }
        if let Some(content) = req.content {
            event.content = content;
        }
        if let Some(tags) = req.tags {
            event.tags = tags;
        }
        if let Some(is_published) = req.is_published {
            event.is_published = is_published;
        }
        event.updated_at = Utc::now();

        tracing::info!(event_id = %event_id, "Event updated");
        Ok(event.clone())
    }

    pub async fn delete_event(&self, admin_id: &str, event_id: &str) -> ClubResult<()> {
        let mut store = self.store.write().await;
        store.require_admin(admin_id)?;

        store
            .remove_event(event_id)
            .ok_or(ClubError::NotFound("Event"))?;
        tracing::info!(event_id = %event_id, "Event deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            content: "details".to_string(),
            tags: vec!["meetup".to_string()],
            is_published: false,
        }
    }

    #[tokio::test]
    async fn drafts_are_hidden_from_public_listing() {
        let service = EventService::new(ClubStore::seeded().into_shared());
        let created = service.create_event("admin", draft("Hackathon")).await.unwrap();
        assert_eq!(created.author_name, "Admin");

        assert_eq!(service.list_events(false).await.len(), 1);
        let all = service.list_events(true).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, created.id);
    }

    #[tokio::test]
    async fn update_publishes_and_touches_timestamp() {
        let service = EventService::new(ClubStore::seeded().into_shared());
        let created = service.create_event("admin", draft("Hackathon")).await.unwrap();

        let updated = service
            .update_event(
                "admin",
                &created.id,
                UpdateEventRequest {
                    is_published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_published);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.title, "Hackathon");
        assert_eq!(service.list_events(false).await.len(), 2);
    }

    #[tokio::test]
    async fn members_cannot_manage_events() {
        let service = EventService::new(ClubStore::seeded().into_shared());
        assert!(matches!(
            service.create_event("1", draft("x")).await,
            Err(ClubError::AdminRequired)
        ));
        assert!(matches!(
            service.delete_event("admin", "missing").await,
            Err(ClubError::NotFound("Event"))
        ));
        service.delete_event("admin", "1").await.unwrap();
        assert!(service.list_events(true).await.is_empty());
    }
}

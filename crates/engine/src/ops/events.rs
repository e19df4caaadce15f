use chrono::Utc;

use crate::{Event, EventChanges, EventDraft, ResultEngine, rules};

use super::Engine;

impl Engine {
    /// Create an event owned by `user_id`.
    pub async fn new_event(&self, draft: EventDraft, user_id: i32) -> ResultEngine<Event> {
        let new_event = rules::create_event(user_id, draft)?;
        let event = self.store.insert_event(&new_event).await?;
        tracing::info!(event_id = event.id, creator_id = user_id, "event created");
        Ok(event)
    }

    /// Events created by `user_id`.
    pub async fn list_events(&self, user_id: i32) -> ResultEngine<Vec<Event>> {
        self.store.events_by_creator(user_id).await
    }

    /// Return an event snapshot.
    ///
    /// Authorization: creator only.
    pub async fn event(&self, event_id: i32, user_id: i32) -> ResultEngine<Event> {
        let event = self.store.event(event_id).await?;
        rules::fetch_event(user_id, event)
    }

    /// Replace name, description, venue and time of an event.
    ///
    /// Authorization: creator only, and only while the event is not past.
    pub async fn update_event(
        &self,
        event_id: i32,
        changes: EventChanges,
        user_id: i32,
    ) -> ResultEngine<()> {
        let event = self.store.event(event_id).await?;
        let changes = rules::update_event(user_id, event.as_ref(), changes, Utc::now())?;
        self.store.update_event(event_id, &changes).await?;
        tracing::debug!(event_id, "event updated");
        Ok(())
    }

    /// Delete an event with its invitations and expenditures.
    ///
    /// Authorization: creator only.
    pub async fn delete_event(&self, event_id: i32, user_id: i32) -> ResultEngine<()> {
        let event = self.store.event(event_id).await?;
        rules::delete_event(user_id, event.as_ref())?;
        self.store.delete_event(event_id).await?;
        tracing::info!(event_id, "event deleted");
        Ok(())
    }
}

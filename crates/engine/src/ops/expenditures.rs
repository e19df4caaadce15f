use crate::{Expenditure, ExpenditureDraft, ResultEngine, rules};

use super::Engine;

impl Engine {
    /// Expenditures of an event.
    ///
    /// Authorization: creator only.
    pub async fn expenditures(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> ResultEngine<Vec<Expenditure>> {
        let event = self.store.event(event_id).await?;
        let event_id = rules::list_expenditures(user_id, event.as_ref())?;
        self.store.expenditures_for_event(event_id).await
    }

    /// Record an expenditure against an event.
    ///
    /// Any authenticated user may add one as long as the event exists.
    pub async fn add_expenditure(
        &self,
        event_id: i32,
        draft: ExpenditureDraft,
        user_id: i32,
    ) -> ResultEngine<Expenditure> {
        let event = self.store.event(event_id).await?;
        let new_expenditure = rules::add_expenditure(event.as_ref(), draft)?;
        let expenditure = self.store.insert_expenditure(&new_expenditure).await?;
        tracing::info!(
            expenditure_id = expenditure.id,
            event_id,
            added_by = user_id,
            "expenditure added"
        );
        Ok(expenditure)
    }

    /// Delete an expenditure.
    ///
    /// Authorization: creator of the expenditure's event only.
    pub async fn delete_expenditure(&self, expenditure_id: i32, user_id: i32) -> ResultEngine<()> {
        let expenditure = self.store.expenditure(expenditure_id).await?;
        let event = match &expenditure {
            Some(expenditure) => self.store.event(expenditure.event_id).await?,
            None => None,
        };
        let expenditure_id =
            rules::delete_expenditure(user_id, expenditure.as_ref(), event.as_ref())?;
        self.store.delete_expenditure(expenditure_id).await?;
        tracing::info!(expenditure_id, "expenditure deleted");
        Ok(())
    }
}

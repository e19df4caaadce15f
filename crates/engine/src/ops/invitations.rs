use chrono::Utc;

use crate::{EngineError, Guest, InvitedEvent, ResultEngine, rules, util::normalize_email};

use super::Engine;

impl Engine {
    /// Invite the user registered with `email` to an event.
    ///
    /// Rejections, in order: malformed email (`InvalidInput`), unknown user or
    /// event (`KeyNotFound`), already invited (`ExistingKey`), past event
    /// (`Forbidden`).
    pub async fn invite(&self, event_id: i32, email: &str, user_id: i32) -> ResultEngine<Guest> {
        let email = normalize_email(email)?;
        let target = self.store.user_by_email(&email).await?;
        let event = self.store.event(event_id).await?;
        let existing = match (&target, &event) {
            (Some(target), Some(event)) => self.store.invitation_for(target.id, event.id).await?,
            _ => None,
        };

        let (guest, event_id) =
            rules::invite_user(target.as_ref(), event.as_ref(), existing.as_ref(), Utc::now())?;
        let invitation = self.store.insert_invitation(guest.id, event_id).await?;
        tracing::info!(
            event_id,
            guest_id = guest.id,
            invited_by = user_id,
            "user invited"
        );

        Ok(Guest {
            id: invitation.id,
            status: invitation.status,
            user: guest.clone(),
        })
    }

    /// Events `user_id` is invited to, with their answer and the inviter.
    pub async fn invited_events(&self, user_id: i32) -> ResultEngine<Vec<InvitedEvent>> {
        let invitations = self.store.invitations_for_user(user_id).await?;
        let mut out = Vec::with_capacity(invitations.len());
        for invitation in invitations {
            let Some(event) = self.store.event(invitation.event_id).await? else {
                continue;
            };
            let Some(invited_by) = self.store.user(event.creator_id).await? else {
                continue;
            };
            out.push(InvitedEvent {
                event,
                status: invitation.status,
                invited_by,
            });
        }
        Ok(out)
    }

    /// A single event `user_id` is invited to.
    ///
    /// Authorization: invitees only.
    pub async fn invited_event(&self, event_id: i32, user_id: i32) -> ResultEngine<InvitedEvent> {
        let invitation = self.store.invitation_for(user_id, event_id).await?;
        let invitation = rules::fetch_invited_event(invitation.as_ref())?;

        let not_found =
            || EngineError::KeyNotFound("Event with this id does not exist".to_string());
        let event = self.store.event(event_id).await?.ok_or_else(not_found)?;
        let invited_by = self
            .store
            .user(event.creator_id)
            .await?
            .ok_or_else(not_found)?;

        Ok(InvitedEvent {
            event,
            status: invitation.status,
            invited_by,
        })
    }

    /// Answer the caller's invitation to an event.
    ///
    /// Authorization: the invited user only.
    pub async fn set_invitation_status(
        &self,
        event_id: i32,
        status: i32,
        user_id: i32,
    ) -> ResultEngine<()> {
        let invitation = self.store.invitation_for(user_id, event_id).await?;
        let (invitation_id, status) = rules::set_invitation_status(invitation.as_ref(), status)?;
        self.store
            .set_invitation_status(invitation_id, status)
            .await?;
        tracing::debug!(invitation_id, status = status.code(), "invitation answered");
        Ok(())
    }

    /// Withdraw an invitation.
    ///
    /// Authorization: creator of the invitation's event only.
    pub async fn remove_invitation(&self, invitation_id: i32, user_id: i32) -> ResultEngine<()> {
        let invitation = self.store.invitation(invitation_id).await?;
        let event = match &invitation {
            Some(invitation) => self.store.event(invitation.event_id).await?,
            None => None,
        };
        let invitation_id =
            rules::remove_invitation(user_id, invitation.as_ref(), event.as_ref())?;
        self.store.delete_invitation(invitation_id).await?;
        tracing::info!(invitation_id, "invitation removed");
        Ok(())
    }

    /// Guest list of an event.
    ///
    /// Authorization: the creator and every invitee.
    pub async fn guests(&self, event_id: i32, user_id: i32) -> ResultEngine<Vec<Guest>> {
        let event = self.store.event(event_id).await?;
        let own_invitation = match &event {
            Some(event) => self.store.invitation_for(user_id, event.id).await?,
            None => None,
        };
        let event_id = rules::fetch_guest_list(user_id, event.as_ref(), own_invitation.as_ref())?;
        self.store.guests(event_id).await
    }
}

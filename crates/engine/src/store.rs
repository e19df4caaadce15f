//! Persistence interface used by the engine.
//!
//! The engine only talks to a [`Store`]; [`SeaStore`] is the relational
//! implementation on top of sea-orm. Lookups return `Ok(None)` for missing
//! rows and leave the classification to the access rules.

use async_trait::async_trait;

use crate::{
    Event, EventChanges, Expenditure, Guest, Invitation, InvitationStatus, NewEvent,
    NewExpenditure, ResultEngine, User,
};

pub use sea::SeaStore;

mod sea;

#[async_trait]
pub trait Store: std::fmt::Debug + Send + Sync {
    async fn user(&self, user_id: i32) -> ResultEngine<Option<User>>;
    async fn user_by_email(&self, email: &str) -> ResultEngine<Option<User>>;
    async fn user_by_token(&self, token: &str) -> ResultEngine<Option<User>>;
    /// Fails with `ExistingKey` if the email is taken.
    async fn insert_user(&self, name: &str, email: &str, token: &str) -> ResultEngine<User>;

    async fn event(&self, event_id: i32) -> ResultEngine<Option<Event>>;
    async fn events_by_creator(&self, creator_id: i32) -> ResultEngine<Vec<Event>>;
    async fn count_events_by_creator(&self, creator_id: i32) -> ResultEngine<u64>;
    async fn insert_event(&self, event: &NewEvent) -> ResultEngine<Event>;
    async fn update_event(&self, event_id: i32, changes: &EventChanges) -> ResultEngine<()>;
    /// Deletes the event together with its invitations and expenditures.
    async fn delete_event(&self, event_id: i32) -> ResultEngine<()>;

    async fn invitation(&self, invitation_id: i32) -> ResultEngine<Option<Invitation>>;
    async fn invitation_for(&self, user_id: i32, event_id: i32)
    -> ResultEngine<Option<Invitation>>;
    async fn invitations_for_user(&self, user_id: i32) -> ResultEngine<Vec<Invitation>>;
    async fn count_invitations_for_user(&self, user_id: i32) -> ResultEngine<u64>;
    async fn guests(&self, event_id: i32) -> ResultEngine<Vec<Guest>>;
    /// Fails with `ExistingKey` if the (user, event) pair is already invited.
    async fn insert_invitation(&self, user_id: i32, event_id: i32) -> ResultEngine<Invitation>;
    async fn set_invitation_status(
        &self,
        invitation_id: i32,
        status: InvitationStatus,
    ) -> ResultEngine<()>;
    async fn delete_invitation(&self, invitation_id: i32) -> ResultEngine<()>;

    async fn expenditure(&self, expenditure_id: i32) -> ResultEngine<Option<Expenditure>>;
    async fn expenditures_for_event(&self, event_id: i32) -> ResultEngine<Vec<Expenditure>>;
    async fn insert_expenditure(&self, expenditure: &NewExpenditure)
    -> ResultEngine<Expenditure>;
    async fn delete_expenditure(&self, expenditure_id: i32) -> ResultEngine<()>;
}

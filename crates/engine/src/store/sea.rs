use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    EngineError, Event, EventChanges, Expenditure, Guest, Invitation, InvitationStatus, NewEvent,
    NewExpenditure, ResultEngine, User, events, expenditures, invitations, users,
};

use super::Store;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

/// Map a unique constraint violation to `ExistingKey`, anything else stays a
/// database error.
fn existing_or_db(err: DbErr, reason: &str) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => EngineError::ExistingKey(reason.to_string()),
        _ => EngineError::Database(err),
    }
}

/// [`Store`] backed by a sea-orm connection.
#[derive(Clone, Debug)]
pub struct SeaStore {
    database: DatabaseConnection,
}

impl SeaStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Store for SeaStore {
    async fn user(&self, user_id: i32) -> ResultEngine<Option<User>> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?;
        Ok(model.map(User::from))
    }

    async fn user_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;
        Ok(model.map(User::from))
    }

    async fn user_by_token(&self, token: &str) -> ResultEngine<Option<User>> {
        let model = users::Entity::find()
            .filter(users::Column::Token.eq(token))
            .one(&self.database)
            .await?;
        Ok(model.map(User::from))
    }

    async fn insert_user(&self, name: &str, email: &str, token: &str) -> ResultEngine<User> {
        let active = users::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            token: ActiveValue::Set(token.to_string()),
        };
        let model = active
            .insert(&self.database)
            .await
            .map_err(|err| existing_or_db(err, "User with this email already exists"))?;
        Ok(User::from(model))
    }

    async fn event(&self, event_id: i32) -> ResultEngine<Option<Event>> {
        let model = events::Entity::find_by_id(event_id)
            .one(&self.database)
            .await?;
        Ok(model.map(Event::from))
    }

    async fn events_by_creator(&self, creator_id: i32) -> ResultEngine<Vec<Event>> {
        let models = events::Entity::find()
            .filter(events::Column::CreatorId.eq(creator_id))
            .order_by_asc(events::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Event::from).collect())
    }

    async fn count_events_by_creator(&self, creator_id: i32) -> ResultEngine<u64> {
        events::Entity::find()
            .filter(events::Column::CreatorId.eq(creator_id))
            .count(&self.database)
            .await
            .map_err(Into::into)
    }

    async fn insert_event(&self, event: &NewEvent) -> ResultEngine<Event> {
        let model = events::ActiveModel::from(event)
            .insert(&self.database)
            .await?;
        Ok(Event::from(model))
    }

    async fn update_event(&self, event_id: i32, changes: &EventChanges) -> ResultEngine<()> {
        let active = events::ActiveModel {
            id: ActiveValue::Unchanged(event_id),
            name: ActiveValue::Set(changes.name.clone()),
            description: ActiveValue::Set(changes.description.clone()),
            venue: ActiveValue::Set(changes.venue.clone()),
            time: ActiveValue::Set(changes.time),
            ..Default::default()
        };
        active.update(&self.database).await?;
        Ok(())
    }

    async fn delete_event(&self, event_id: i32) -> ResultEngine<()> {
        // sqlite only cascades when `foreign_keys` is on.
        with_tx!(self, |db_tx| {
            invitations::Entity::delete_many()
                .filter(invitations::Column::EventId.eq(event_id))
                .exec(&db_tx)
                .await?;
            expenditures::Entity::delete_many()
                .filter(expenditures::Column::EventId.eq(event_id))
                .exec(&db_tx)
                .await?;
            events::Entity::delete_by_id(event_id).exec(&db_tx).await?;
            Ok(())
        })
    }

    async fn invitation(&self, invitation_id: i32) -> ResultEngine<Option<Invitation>> {
        invitations::Entity::find_by_id(invitation_id)
            .one(&self.database)
            .await?
            .map(Invitation::try_from)
            .transpose()
    }

    async fn invitation_for(
        &self,
        user_id: i32,
        event_id: i32,
    ) -> ResultEngine<Option<Invitation>> {
        invitations::Entity::find()
            .filter(invitations::Column::UserId.eq(user_id))
            .filter(invitations::Column::EventId.eq(event_id))
            .one(&self.database)
            .await?
            .map(Invitation::try_from)
            .transpose()
    }

    async fn invitations_for_user(&self, user_id: i32) -> ResultEngine<Vec<Invitation>> {
        invitations::Entity::find()
            .filter(invitations::Column::UserId.eq(user_id))
            .order_by_asc(invitations::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Invitation::try_from)
            .collect()
    }

    async fn count_invitations_for_user(&self, user_id: i32) -> ResultEngine<u64> {
        invitations::Entity::find()
            .filter(invitations::Column::UserId.eq(user_id))
            .count(&self.database)
            .await
            .map_err(Into::into)
    }

    async fn guests(&self, event_id: i32) -> ResultEngine<Vec<Guest>> {
        let rows = invitations::Entity::find()
            .filter(invitations::Column::EventId.eq(event_id))
            .find_also_related(users::Entity)
            .order_by_asc(invitations::Column::Id)
            .all(&self.database)
            .await?;

        let mut guests = Vec::with_capacity(rows.len());
        for (invitation, user) in rows {
            let Some(user) = user else {
                continue;
            };
            guests.push(Guest {
                id: invitation.id,
                status: InvitationStatus::try_from(invitation.status)?,
                user: User::from(user),
            });
        }
        Ok(guests)
    }

    async fn insert_invitation(&self, user_id: i32, event_id: i32) -> ResultEngine<Invitation> {
        let model = invitations::ActiveModel::pending(user_id, event_id)
            .insert(&self.database)
            .await
            .map_err(|err| existing_or_db(err, "User is already invited to this event"))?;
        Invitation::try_from(model)
    }

    async fn set_invitation_status(
        &self,
        invitation_id: i32,
        status: InvitationStatus,
    ) -> ResultEngine<()> {
        let active = invitations::ActiveModel {
            id: ActiveValue::Unchanged(invitation_id),
            status: ActiveValue::Set(status.code()),
            ..Default::default()
        };
        active.update(&self.database).await?;
        Ok(())
    }

    async fn delete_invitation(&self, invitation_id: i32) -> ResultEngine<()> {
        invitations::Entity::delete_by_id(invitation_id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn expenditure(&self, expenditure_id: i32) -> ResultEngine<Option<Expenditure>> {
        let model = expenditures::Entity::find_by_id(expenditure_id)
            .one(&self.database)
            .await?;
        Ok(model.map(Expenditure::from))
    }

    async fn expenditures_for_event(&self, event_id: i32) -> ResultEngine<Vec<Expenditure>> {
        let models = expenditures::Entity::find()
            .filter(expenditures::Column::EventId.eq(event_id))
            .order_by_asc(expenditures::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expenditure::from).collect())
    }

    async fn insert_expenditure(
        &self,
        expenditure: &NewExpenditure,
    ) -> ResultEngine<Expenditure> {
        let model = expenditures::ActiveModel::from(expenditure)
            .insert(&self.database)
            .await?;
        Ok(Expenditure::from(model))
    }

    async fn delete_expenditure(&self, expenditure_id: i32) -> ResultEngine<()> {
        expenditures::Entity::delete_by_id(expenditure_id)
            .exec(&self.database)
            .await?;
        Ok(())
    }
}

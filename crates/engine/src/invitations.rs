//! Invitations of users to events and their response status.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, Event, User};

/// Response of an invited user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    /// Integer stored in the database and exchanged with clients.
    pub fn code(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Declined => 2,
        }
    }
}

impl TryFrom<i32> for InvitationStatus {
    type Error = EngineError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Declined),
            other => Err(EngineError::InvalidInput(format!(
                "invalid invitation status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invitation {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub status: InvitationStatus,
}

/// An invited user as seen in the guest list of an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guest {
    /// Invitation id.
    pub id: i32,
    pub status: InvitationStatus,
    pub user: User,
}

/// An event the caller is invited to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvitedEvent {
    pub event: Event,
    pub status: InvitationStatus,
    /// Creator of the event.
    pub invited_by: User,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub status: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn pending(user_id: i32, event_id: i32) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            event_id: ActiveValue::Set(event_id),
            status: ActiveValue::Set(InvitationStatus::Pending.code()),
        }
    }
}

impl TryFrom<Model> for Invitation {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            event_id: model.event_id,
            status: InvitationStatus::try_from(model.status)?,
        })
    }
}

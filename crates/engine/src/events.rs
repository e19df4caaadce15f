//! The module contains `Event` and its persistence model.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::util::truncate_to_seconds;

/// A scheduled gathering owned by its creator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub time: DateTime<Utc>,
    /// Duration as supplied by the client.
    pub duration: i32,
    /// Owning user. Never changes after creation.
    pub creator_id: i32,
    /// Reference of the event in the external calendar.
    pub fire_id: String,
}

impl Event {
    /// Whether the event started before `now`.
    ///
    /// Both instants are compared at second precision, so an event scheduled
    /// within the current second is not past yet.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        truncate_to_seconds(self.time) < truncate_to_seconds(now)
    }

    pub fn is_created_by(&self, user_id: i32) -> bool {
        self.creator_id == user_id
    }
}

/// Client supplied fields of a new event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub venue: String,
    pub time: DateTime<Utc>,
    pub duration: i32,
    pub fire_id: String,
}

/// A validated event ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    pub draft: EventDraft,
    pub creator_id: i32,
}

/// Fields an event creator may change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventChanges {
    pub name: String,
    pub description: String,
    pub venue: String,
    pub time: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub time: DateTimeUtc,
    pub duration: i32,
    pub creator_id: i32,
    pub fire_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::invitations::Entity")]
    Invitations,
    #[sea_orm(has_many = "super::expenditures::Entity")]
    Expenditures,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::invitations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invitations.def()
    }
}

impl Related<super::expenditures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenditures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewEvent> for ActiveModel {
    fn from(event: &NewEvent) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(event.draft.name.clone()),
            description: ActiveValue::Set(event.draft.description.clone()),
            venue: ActiveValue::Set(event.draft.venue.clone()),
            time: ActiveValue::Set(event.draft.time),
            duration: ActiveValue::Set(event.draft.duration),
            creator_id: ActiveValue::Set(event.creator_id),
            fire_id: ActiveValue::Set(event.draft.fire_id.clone()),
        }
    }
}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            venue: model.venue,
            time: model.time,
            duration: model.duration,
            creator_id: model.creator_id,
            fire_id: model.fire_id,
        }
    }
}

//! Cost lines attached to an event.

use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expenditure {
    pub id: i32,
    pub name: String,
    pub organization: String,
    pub quantity: i32,
    pub unit_price: i32,
    pub event_id: i32,
}

/// Client supplied fields of a new expenditure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenditureDraft {
    pub name: String,
    pub organization: String,
    pub quantity: i32,
    pub unit_price: i32,
}

/// A validated expenditure ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpenditure {
    pub draft: ExpenditureDraft,
    pub event_id: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "expenditures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub organization: String,
    pub quantity: i32,
    pub unit_price: i32,
    pub event_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewExpenditure> for ActiveModel {
    fn from(expenditure: &NewExpenditure) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(expenditure.draft.name.clone()),
            organization: ActiveValue::Set(expenditure.draft.organization.clone()),
            quantity: ActiveValue::Set(expenditure.draft.quantity),
            unit_price: ActiveValue::Set(expenditure.draft.unit_price),
            event_id: ActiveValue::Set(expenditure.event_id),
        }
    }
}

impl From<Model> for Expenditure {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            organization: model.organization,
            quantity: model.quantity,
            unit_price: model.unit_price,
            event_id: model.event_id,
        }
    }
}

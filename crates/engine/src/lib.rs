//! Event planning engine.
//!
//! The [`Engine`] runs every operation in three steps: fetch the records the
//! operation needs from the [`Store`], check them with the matching predicate
//! in [`rules`], then persist. The caller is always passed explicitly as a
//! user id.

pub use error::EngineError;
pub use events::{Event, EventChanges, EventDraft, NewEvent};
pub use expenditures::{Expenditure, ExpenditureDraft, NewExpenditure};
pub use invitations::{Guest, Invitation, InvitationStatus, InvitedEvent};
pub use ops::{Engine, EngineBuilder, Usage};
pub use store::{SeaStore, Store};
pub use users::User;

pub use sea_orm::DbErr;

pub mod rules;
pub mod store;

mod error;
mod events;
mod expenditures;
mod invitations;
mod ops;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

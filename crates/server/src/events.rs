//! Event API endpoints.

use api_types::{
    Empty,
    event::{EventNew, EventUpdate, EventView, InvitedEventView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{Event, EventChanges, EventDraft, InvitedEvent, User};

use crate::{ApiJson, ApiPath, ServerError, server::ServerState};

fn event_view(event: Event) -> EventView {
    EventView {
        id: event.id,
        name: event.name,
        description: event.description,
        venue: event.venue,
        time: event.time,
        fire_id: event.fire_id,
        duration: event.duration,
    }
}

fn invited_event_view(invited: InvitedEvent) -> InvitedEventView {
    InvitedEventView {
        invited_by: invited.invited_by.label(),
        status: invited.status.code(),
        event: event_view(invited.event),
    }
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<EventNew>,
) -> Result<(StatusCode, Json<EventView>), ServerError> {
    let draft = EventDraft {
        name: payload.name,
        description: payload.description,
        venue: payload.venue,
        time: payload.time,
        duration: payload.duration,
        fire_id: payload.fire_id,
    };
    let event = state.engine.new_event(draft, user.id).await?;

    Ok((StatusCode::CREATED, Json(event_view(event))))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<EventView>>, ServerError> {
    let events = state.engine.list_events(user.id).await?;
    Ok(Json(events.into_iter().map(event_view).collect()))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
) -> Result<Json<EventView>, ServerError> {
    let event = state.engine.event(event_id, user.id).await?;
    Ok(Json(event_view(event)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<EventUpdate>,
) -> Result<Json<Empty>, ServerError> {
    let changes = EventChanges {
        name: payload.name,
        description: payload.description,
        venue: payload.venue,
        time: payload.time,
    };
    state.engine.update_event(event_id, changes, user.id).await?;
    Ok(Json(Empty {}))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
) -> Result<Json<Empty>, ServerError> {
    state.engine.delete_event(event_id, user.id).await?;
    Ok(Json(Empty {}))
}

pub async fn list_invited(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<InvitedEventView>>, ServerError> {
    let events = state.engine.invited_events(user.id).await?;
    Ok(Json(events.into_iter().map(invited_event_view).collect()))
}

pub async fn get_invited(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
) -> Result<Json<InvitedEventView>, ServerError> {
    let event = state.engine.invited_event(event_id, user.id).await?;
    Ok(Json(invited_event_view(event)))
}

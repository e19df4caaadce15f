//! Invitation API endpoints.

use api_types::{
    Empty,
    invitation::{GuestView, InvitationStatusUpdate, InviteNew},
};
use axum::{Extension, Json, extract::State};
use engine::{Guest, User};

use crate::{ApiJson, ApiPath, ServerError, server::ServerState};

fn guest_view(guest: Guest) -> GuestView {
    GuestView {
        id: guest.id,
        status: guest.status.code(),
        name: guest.user.name,
        email: guest.user.email,
    }
}

pub async fn invite(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<InviteNew>,
) -> Result<Json<GuestView>, ServerError> {
    let guest = state
        .engine
        .invite(event_id, &payload.email, user.id)
        .await?;
    Ok(Json(guest_view(guest)))
}

/// Answer the caller's invitation to the event in the path.
pub async fn set_status(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<InvitationStatusUpdate>,
) -> Result<Json<Empty>, ServerError> {
    state
        .engine
        .set_invitation_status(event_id, payload.status, user.id)
        .await?;
    Ok(Json(Empty {}))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(invitation_id): ApiPath<i32>,
) -> Result<Json<Empty>, ServerError> {
    state
        .engine
        .remove_invitation(invitation_id, user.id)
        .await?;
    Ok(Json(Empty {}))
}

pub async fn guests(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
) -> Result<Json<Vec<GuestView>>, ServerError> {
    let guests = state.engine.guests(event_id, user.id).await?;
    Ok(Json(guests.into_iter().map(guest_view).collect()))
}

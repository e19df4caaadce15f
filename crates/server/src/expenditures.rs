//! Expenditure API endpoints.
//!
//! `/expenditure/{id}/` carries an event id for `GET` and `POST` and an
//! expenditure id for `DELETE`.

use api_types::{
    Empty,
    expenditure::{ExpenditureNew, ExpenditureView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{Expenditure, ExpenditureDraft, User};

use crate::{ApiJson, ApiPath, ServerError, server::ServerState};

fn expenditure_view(expenditure: Expenditure) -> ExpenditureView {
    ExpenditureView {
        id: expenditure.id,
        name: expenditure.name,
        organization: expenditure.organization,
        quantity: expenditure.quantity,
        unit_price: expenditure.unit_price,
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
) -> Result<Json<Vec<ExpenditureView>>, ServerError> {
    let expenditures = state.engine.expenditures(event_id, user.id).await?;
    Ok(Json(expenditures.into_iter().map(expenditure_view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(event_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ExpenditureNew>,
) -> Result<(StatusCode, Json<ExpenditureView>), ServerError> {
    let draft = ExpenditureDraft {
        name: payload.name,
        organization: payload.organization,
        quantity: payload.quantity,
        unit_price: payload.unit_price,
    };
    let expenditure = state
        .engine
        .add_expenditure(event_id, draft, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(expenditure_view(expenditure))))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    ApiPath(expenditure_id): ApiPath<i32>,
) -> Result<Json<Empty>, ServerError> {
    state
        .engine
        .delete_expenditure(expenditure_id, user.id)
        .await?;
    Ok(Json(Empty {}))
}

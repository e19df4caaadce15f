use api_types::usage::Usage;
use axum::{Extension, Json, extract::State};
use engine::User;

use crate::{ServerError, server::ServerState};

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Usage>, ServerError> {
    let usage = state.engine.usage(user.id).await?;
    Ok(Json(Usage {
        created: usage.created,
        invited: usage.invited,
    }))
}

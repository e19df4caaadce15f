use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{events, expenditures, invitations, usage};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolve the bearer token to a user and attach it to the request.
async fn auth(
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user = state
        .engine
        .authenticate(bearer.token())
        .await
        .map_err(|err| {
            tracing::error!("failed to authenticate request: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn router(engine: Arc<Engine>) -> Router {
    let state = ServerState { engine };

    Router::new()
        .route("/create/", post(events::create))
        .route("/fetch/", get(events::list))
        .route("/fetch/invited", get(events::list_invited))
        .route("/fetch/invited/{id}/", get(events::get_invited))
        .route("/fetch/{id}/", get(events::get))
        .route("/fetch/{id}/guests/", get(invitations::guests))
        .route("/update/{id}/", put(events::update))
        .route("/delete/{id}/", delete(events::remove))
        .route("/invite/{id}/", post(invitations::invite))
        .route("/invitation/status/{id}/", post(invitations::set_status))
        .route("/invitation/remove/{id}/", delete(invitations::remove))
        .route(
            "/expenditure/{id}/",
            get(expenditures::list)
                .post(expenditures::create)
                .delete(expenditures::remove),
        )
        .route("/usage/", get(usage::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine))).await
}

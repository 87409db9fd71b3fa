//! Login endpoint.

use api_types::auth::{Login, LoginToken};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{ServerError, json_body, server::ServerState};

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Login>, JsonRejection>,
) -> Result<Json<LoginToken>, ServerError> {
    let Login { email, password } = json_body(payload)?;
    let token = state.engine.login(&email, &password)?;
    Ok(Json(LoginToken { token }))
}

//! Handler for `POST /login`.

use axum::extract::State;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Request body for `POST /login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
///
/// Authenticate the admin login. Returns the bearer token as plain text.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<String> {
    let token = state.auth.authenticate(&input.username, &input.password)?;
    tracing::info!("Admin logged in");
    Ok(token)
}

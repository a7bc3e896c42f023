//! Bearer-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::Authorized;
use crate::error::AppError;
use crate::state::AppState;

/// Every `/api` handler takes [`Authorized`] as its first extractor, so the
/// token is checked before the body is read:
///
/// ```ignore
/// async fn my_handler(_auth: Authorized, State(state): State<AppState>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        Ok(state.auth.verify(header)?)
    }
}

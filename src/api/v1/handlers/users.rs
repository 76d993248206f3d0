/*
 * Responsibility
 * - /users/me: the caller's own account (full record, looked up)
 * - /users/me/id: the caller's identity as the token states it (no lookup)
 */
use axum::Json;
use axum::extract::State;

use crate::api::v1::dto::users::{PrincipalResponse, UserResponse};
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::services::auth::principal::resolve_minimal;
use crate::state::AppState;

pub async fn me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth.current_user(&ctx).await?;
    Ok(Json(user.into()))
}

pub async fn my_id(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<PrincipalResponse>, AppError> {
    let principal = resolve_minimal(&ctx)?;
    Ok(Json(principal.into()))
}

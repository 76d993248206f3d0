/*
 * Responsibility
 * - GET /admin/users/{user_id} (ROLE_ADMIN only; enforced by the route guard)
 */
use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use crate::api::v1::dto::users::UserResponse;
use crate::api::v1::extractors::AppPath;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth.find_user(user_id).await?;
    Ok(Json(user.into()))
}

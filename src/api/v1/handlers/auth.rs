/*
 * Responsibility
 * - POST /api/v1/auth/login
 * - DTO validation → AuthService::login → token in body and Authorization header
 */
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};

use crate::api::v1::dto::login::{LoginRequest, LoginResponse};
use crate::api::v1::extractors::AppJson;
use crate::error::AppError;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let out = state.auth.login(&req.username, &req.password).await?;

    let bearer = HeaderValue::from_str(&format!("{} {}", out.token_type, out.access_token))
        .map_err(AppError::internal)?;

    Ok((
        StatusCode::OK,
        AppendHeaders([(header::AUTHORIZATION, bearer)]),
        Json(LoginResponse {
            access_token: out.access_token,
            token_type: out.token_type,
            expires_in: out.expires_in,
        }),
    ))
}

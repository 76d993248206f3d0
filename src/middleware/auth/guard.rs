//! Route guards: the authorization stage.
//!
//! Applied with `route_layer` on the routes that need a principal. They read
//! the `AuthCtx` left by [`super::access`] and turn a missing principal into
//! the most specific failure available.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::AppError;
use crate::services::auth::AuthCtx;
use crate::services::auth::context::authorize;
use crate::services::auth::role::Role;

pub async fn require_authenticated(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    check(&req, None)?;
    Ok(next.run(req).await)
}

/// Use with `middleware::from_fn_with_state(Role::Admin, require_role)`.
pub async fn require_role(
    State(role): State<Role>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    check(&req, Some(role))?;
    Ok(next.run(req).await)
}

fn check(req: &Request<Body>, required: Option<Role>) -> Result<(), AppError> {
    // A missing AuthCtx means the access layer was not installed; treat as anonymous.
    let anonymous = AuthCtx::Anonymous;
    let ctx = req.extensions().get::<AuthCtx>().unwrap_or(&anonymous);

    authorize(ctx, required).map(|_| ()).map_err(|failure| {
        debug!(
            method = %req.method(),
            path = %req.uri().path(),
            failure = %failure,
            "request not authorized"
        );
        AppError::from(failure)
    })
}

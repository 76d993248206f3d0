use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::auth::AuthCtx;

/// The `AuthCtx` the access middleware stored for this request.
///
/// Never rejects: without the middleware the request is simply anonymous.
/// Whether anonymity is acceptable is up to the resolver the handler calls.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthCtxExtractor(
            parts.extensions.get::<AuthCtx>().cloned().unwrap_or_default(),
        ))
    }
}

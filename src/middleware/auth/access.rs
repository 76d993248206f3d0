//! Bearer token verification → `AuthCtx` in the request extensions.
//!
//! This layer never rejects. It records what it found (a principal, a failure
//! marker, or nothing) and always continues; the route guards in
//! [`super::guard`] decide whether that is enough.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use tracing::{debug, warn};

use crate::services::auth::jwt::JwtCodec;
use crate::services::auth::{AuthCtx, Principal};
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Attach the authentication middleware to every route of `router`.
///
/// ```ignore
/// let app = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = authenticate(state.auth.codec(), req.headers());

    // one value per request; dropped with the request
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Token text after the case-sensitive `Bearer ` prefix, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.trim().is_empty())
}

pub fn authenticate(codec: &JwtCodec, headers: &HeaderMap) -> AuthCtx {
    let Some(token) = bearer_token(headers) else {
        return AuthCtx::Anonymous;
    };

    let verified = codec
        .verify(token)
        .and_then(|claims| Principal::from_claims(&claims, token));

    match verified {
        Ok(principal) => {
            debug!(subject = %principal.subject, "bearer token verified");
            AuthCtx::Authenticated(principal)
        }
        Err(failure) => {
            warn!(failure = %failure, "access token verification failed");
            AuthCtx::Failed(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::services::auth::AuthFailure;
    use crate::services::auth::role::{Role, RoleSet};

    const SUB: &str = "11111111-1111-1111-1111-111111111111";

    fn codec() -> JwtCodec {
        JwtCodec::new(b"0123456789abcdef0123456789abcdef").unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn bearer_prefix_is_case_sensitive_and_needs_a_token() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer    ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn no_usable_header_is_anonymous_without_marker() {
        let codec = codec();
        assert_eq!(authenticate(&codec, &HeaderMap::new()), AuthCtx::Anonymous);
        assert_eq!(authenticate(&codec, &headers("Token xyz")), AuthCtx::Anonymous);
    }

    #[test]
    fn valid_token_attaches_principal() {
        let codec = codec();
        let token = codec.issue(SUB, &RoleSet::from([Role::User]), 60).unwrap();

        let ctx = authenticate(&codec, &headers(&format!("Bearer {token}")));
        let principal = ctx.principal().unwrap();

        assert_eq!(principal.subject.to_string(), SUB);
        assert_eq!(principal.roles, RoleSet::from([Role::User]));
        assert_eq!(principal.token, token);
    }

    #[test]
    fn bad_tokens_attach_specific_markers() {
        let codec = codec();
        assert_eq!(
            authenticate(&codec, &headers("Bearer abc.def.ghi")),
            AuthCtx::Failed(AuthFailure::Malformed)
        );

        let expired = codec
            .issue_at(SUB, &RoleSet::from([Role::User]), 60, 1_000)
            .unwrap();
        assert_eq!(
            authenticate(&codec, &headers(&format!("Bearer {expired}"))),
            AuthCtx::Failed(AuthFailure::Expired)
        );

        let foreign = JwtCodec::new(b"ffffffffffffffffffffffffffffffff")
            .unwrap()
            .issue(SUB, &RoleSet::new(), 60)
            .unwrap();
        assert_eq!(
            authenticate(&codec, &headers(&format!("Bearer {foreign}"))),
            AuthCtx::Failed(AuthFailure::InvalidSignature)
        );
    }

    #[test]
    fn verified_token_with_non_uuid_subject_is_malformed() {
        let codec = codec();
        let token = codec.issue("alice", &RoleSet::from([Role::User]), 60).unwrap();

        assert_eq!(
            authenticate(&codec, &headers(&format!("Bearer {token}"))),
            AuthCtx::Failed(AuthFailure::Malformed)
        );
    }
}

/*
 * Responsibility
 * - Request-scoped authentication state (AuthCtx) and the Principal it may carry
 * - The authorization decision for a route (authorize)
 *
 * AuthCtx lives in the request's extensions only: it is created by the
 * authentication middleware and dropped together with the request.
 */
use uuid::Uuid;

use crate::services::auth::failure::AuthFailure;
use crate::services::auth::jwt::Claims;
use crate::services::auth::role::{Role, RoleSet};

/// Authenticated caller derived from a verified token.
///
/// Roles come from the token only; a role change takes effect on reissue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: Uuid,
    pub roles: RoleSet,
    pub token: String,
}

impl Principal {
    /// `sub` must be a UUID; anything else is treated as a malformed token.
    pub fn from_claims(claims: &Claims, token: &str) -> Result<Self, AuthFailure> {
        let subject = Uuid::parse_str(&claims.sub).map_err(|_| AuthFailure::Malformed)?;

        Ok(Self {
            subject,
            roles: claims.roles(),
            token: token.to_string(),
        })
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Outcome of the authentication step for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthCtx {
    /// No usable `Authorization: Bearer` header.
    #[default]
    Anonymous,
    Authenticated(Principal),
    /// A token was presented but did not verify. Consulted only when a route
    /// later requires a principal.
    Failed(AuthFailure),
}

impl AuthCtx {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthCtx::Authenticated(p) => Some(p),
            AuthCtx::Anonymous | AuthCtx::Failed(_) => None,
        }
    }
}

/// Decide whether the request may reach a protected route.
///
/// Precedence without a principal: an attached failure marker wins, otherwise
/// the request is simply unauthenticated. With a principal, a missing required
/// role is an access-denied outcome.
pub fn authorize(ctx: &AuthCtx, required: Option<Role>) -> Result<&Principal, AuthFailure> {
    match ctx {
        AuthCtx::Authenticated(principal) => match required {
            Some(role) if !principal.has_role(role) => Err(AuthFailure::InsufficientPrivilege),
            _ => Ok(principal),
        },
        AuthCtx::Failed(failure) => Err(*failure),
        AuthCtx::Anonymous => Err(AuthFailure::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "11111111-1111-1111-1111-111111111111";

    fn claims(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            iat: 0,
            exp: 60,
        }
    }

    fn principal(roles: &[Role]) -> AuthCtx {
        AuthCtx::Authenticated(Principal {
            subject: Uuid::parse_str(SUB).unwrap(),
            roles: roles.iter().copied().collect(),
            token: "t".to_string(),
        })
    }

    #[test]
    fn principal_from_claims_filters_roles() {
        let p = Principal::from_claims(&claims(SUB, "ROLE_USER,ADMIN,"), "tok").unwrap();
        assert_eq!(p.subject.to_string(), SUB);
        assert_eq!(p.roles, RoleSet::from([Role::User]));
        assert_eq!(p.token, "tok");
    }

    #[test]
    fn non_uuid_subject_is_malformed() {
        assert_eq!(
            Principal::from_claims(&claims("42", "ROLE_USER"), "tok"),
            Err(AuthFailure::Malformed)
        );
    }

    #[test]
    fn authorize_precedence() {
        assert_eq!(
            authorize(&AuthCtx::Failed(AuthFailure::Expired), None),
            Err(AuthFailure::Expired)
        );
        assert_eq!(
            authorize(&AuthCtx::Failed(AuthFailure::Malformed), Some(Role::Admin)),
            Err(AuthFailure::Malformed)
        );
        assert_eq!(
            authorize(&AuthCtx::Anonymous, None),
            Err(AuthFailure::Missing)
        );
        assert_eq!(
            authorize(&principal(&[Role::User]), Some(Role::Admin)),
            Err(AuthFailure::InsufficientPrivilege)
        );
        assert!(authorize(&principal(&[Role::User]), None).is_ok());
        assert!(authorize(&principal(&[Role::Admin]), Some(Role::Admin)).is_ok());
    }
}

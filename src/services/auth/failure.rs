use std::fmt;

use crate::error::code::ErrorCode;

/// Why a request could not be authenticated or authorized.
///
/// Produced by the token verifier and by the authorization guards, then
/// matched exhaustively when the response is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Missing,
    Malformed,
    Expired,
    InvalidSignature,
    InsufficientPrivilege,
}

impl AuthFailure {
    pub fn error_code(self) -> ErrorCode {
        match self {
            AuthFailure::Expired => ErrorCode::TokenExpired,
            AuthFailure::Malformed | AuthFailure::InvalidSignature => ErrorCode::InvalidToken,
            AuthFailure::Missing => ErrorCode::AuthenticationFailed,
            AuthFailure::InsufficientPrivilege => ErrorCode::AccessDenied,
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthFailure::Missing => "missing",
            AuthFailure::Malformed => "malformed",
            AuthFailure::Expired => "expired",
            AuthFailure::InvalidSignature => "invalid_signature",
            AuthFailure::InsufficientPrivilege => "insufficient_privilege",
        };
        f.write_str(s)
    }
}

impl std::error::Error for AuthFailure {}

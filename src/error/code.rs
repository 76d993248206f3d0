use axum::http::StatusCode;

/// Every externally visible failure maps to exactly one of these.
///
/// The string code is part of the public contract; clients branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // common
    InvalidInputValue,
    InternalServerError,
    MethodNotAllowed,
    UnsupportedMediaType,
    EndpointNotFound,
    ServiceUnavailable,
    RequestTimeout,
    PayloadTooLarge,

    // user
    UserNotFound,

    // authentication / authorization
    AuthenticationFailed,
    InvalidCredentials,
    AccessDenied,
    InvalidToken,
    TokenExpired,
    AccountDisabled,
    AccountLocked,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidInputValue => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::EndpointNotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::AuthenticationFailed
            | Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::AccountDisabled
            | Self::AccountLocked => StatusCode::UNAUTHORIZED,
            Self::AccessDenied => StatusCode::FORBIDDEN,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidInputValue => "C001",
            Self::InternalServerError => "C002",
            Self::MethodNotAllowed => "C004",
            Self::UnsupportedMediaType => "C005",
            Self::EndpointNotFound => "C006",
            Self::ServiceUnavailable => "C007",
            Self::RequestTimeout => "C008",
            Self::PayloadTooLarge => "C009",
            Self::UserNotFound => "U002",
            Self::AuthenticationFailed => "A001",
            Self::InvalidCredentials => "A002",
            Self::AccessDenied => "A003",
            Self::InvalidToken => "A004",
            Self::TokenExpired => "A005",
            Self::AccountDisabled => "A006",
            Self::AccountLocked => "A007",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidInputValue => "The input value is invalid.",
            Self::InternalServerError => "An internal server error occurred.",
            Self::MethodNotAllowed => "The HTTP method is not supported.",
            Self::UnsupportedMediaType => "The media type is not supported.",
            Self::EndpointNotFound => "The requested API path does not exist.",
            Self::ServiceUnavailable => "The service is temporarily unavailable.",
            Self::RequestTimeout => "The request took too long to process.",
            Self::PayloadTooLarge => "The request body is too large.",
            Self::UserNotFound => "The user could not be found.",
            Self::AuthenticationFailed => "Authentication failed.",
            Self::InvalidCredentials => "The username or password is incorrect.",
            Self::AccessDenied => "Access is denied.",
            Self::InvalidToken => "The token is invalid.",
            Self::TokenExpired => "The token has expired.",
            Self::AccountDisabled => "The account is disabled.",
            Self::AccountLocked => "The account is locked. Contact an administrator.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_codes() {
        let cases = [
            (ErrorCode::InvalidInputValue, "C001", 400),
            (ErrorCode::AuthenticationFailed, "A001", 401),
            (ErrorCode::InvalidCredentials, "A002", 401),
            (ErrorCode::InvalidToken, "A004", 401),
            (ErrorCode::TokenExpired, "A005", 401),
            (ErrorCode::AccessDenied, "A003", 403),
            (ErrorCode::UserNotFound, "U002", 404),
            (ErrorCode::InternalServerError, "C002", 500),
            (ErrorCode::PayloadTooLarge, "C009", 413),
        ];

        for (code, expected, status) in cases {
            assert_eq!(code.code(), expected);
            assert_eq!(code.status().as_u16(), status);
        }
    }
}

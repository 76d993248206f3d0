use chrono::{DateTime, Utc};
use serde::Serialize;

use super::code::ErrorCode;

/// Wire shape of every error response.
///
/// `detail` and `errors` are omitted entirely unless populated.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub code: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl ErrorResponse {
    pub fn of(code: ErrorCode) -> Self {
        Self {
            timestamp: Utc::now(),
            status: code.status().as_u16(),
            code: code.code(),
            message: code.message(),
            detail: None,
            errors: None,
        }
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::of(code)
        }
    }

    /// An empty list is dropped so the field never serializes as `[]`.
    pub fn with_errors(code: ErrorCode, errors: Vec<FieldError>) -> Self {
        Self {
            errors: (!errors.is_empty()).then_some(errors),
            ..Self::of(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let body = serde_json::to_value(ErrorResponse::of(ErrorCode::InvalidToken)).unwrap();
        let obj = body.as_object().unwrap();

        assert_eq!(obj["status"], 401);
        assert_eq!(obj["code"], "A004");
        assert!(obj.contains_key("timestamp"));
        assert!(!obj.contains_key("detail"));
        assert!(!obj.contains_key("errors"));
    }

    #[test]
    fn field_errors_are_listed_in_order() {
        let errors = vec![
            FieldError::new("username", "ab", "too short"),
            FieldError::new("password", "", "must not be blank"),
        ];
        let body =
            serde_json::to_value(ErrorResponse::with_errors(ErrorCode::InvalidInputValue, errors))
                .unwrap();

        assert_eq!(body["errors"][0]["field"], "username");
        assert_eq!(body["errors"][0]["value"], "ab");
        assert_eq!(body["errors"][1]["reason"], "must not be blank");
    }

    #[test]
    fn empty_field_error_list_is_omitted() {
        let body =
            serde_json::to_value(ErrorResponse::with_errors(ErrorCode::InvalidInputValue, vec![]))
                .unwrap();
        assert!(body.get("errors").is_none());
    }
}

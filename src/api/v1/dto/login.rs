/*
 * Responsibility
 * - Login request/response DTO
 * - validate() collects every field problem at once (returned as `errors`)
 */
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub const USERNAME_MIN: usize = 4;
pub const USERNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 64;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = &self.username;
        let username_len = username.chars().count();
        if username.trim().is_empty() {
            errors.push(FieldError::new("username", username.as_str(), "must not be blank"));
        } else if !(USERNAME_MIN..=USERNAME_MAX).contains(&username_len) {
            errors.push(FieldError::new(
                "username",
                username.as_str(),
                format!("length must be between {USERNAME_MIN} and {USERNAME_MAX}"),
            ));
        } else if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            errors.push(FieldError::new(
                "username",
                username.as_str(),
                "only letters, digits, '.' and '_' are allowed",
            ));
        }

        // The rejected password itself is never echoed back.
        let password = &self.password;
        let password_len = password.chars().count();
        if password.trim().is_empty() {
            errors.push(FieldError::new("password", "", "must not be blank"));
        } else if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&password_len) {
            errors.push(FieldError::new(
                "password",
                "",
                format!("length must be between {PASSWORD_MIN} and {PASSWORD_MAX}"),
            ));
        } else if password.chars().any(char::is_whitespace) {
            errors.push(FieldError::new("password", "", "must not contain whitespace"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
}

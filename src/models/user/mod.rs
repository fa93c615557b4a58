// User module
// Account records and the registration form

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A registered account. The stored credential never leaves the store layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("invalid registration: {0}")]
    Invalid(String),
    #[error("username or email already exists")]
    AlreadyExists,
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Registration form as submitted.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err("Email must look like name@domain".to_string()),
        }

        if self.password.is_empty() {
            return Err("Password cannot be empty".to_string());
        }

        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn registration() -> Registration {
        Registration {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = registration();
        form.confirm_password = "hunter3".to_string();
        assert_eq!(form.validate().unwrap_err(), "Passwords do not match");
    }

    #[test_case("" ; "empty")]
    #[test_case("ada" ; "no at sign")]
    #[test_case("@example.com" ; "no local part")]
    #[test_case("ada@" ; "no domain")]
    fn test_bad_email(email: &str) {
        let mut form = registration();
        form.email = email.to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_blank_username() {
        let mut form = registration();
        form.username = "  ".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_empty_password() {
        let mut form = registration();
        form.password.clear();
        form.confirm_password.clear();
        assert!(form.validate().is_err());
    }
}

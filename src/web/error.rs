use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::task::TaskError;
use crate::models::user::UserError;
use crate::utils::date::DateParseError;

/// Failures surfaced to HTTP clients as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(task_err) = err.downcast_ref::<TaskError>() {
            return match task_err {
                TaskError::Invalid(msg) => Self::BadRequest(msg.clone()),
                TaskError::NotFound(_) => Self::NotFound(task_err.to_string()),
                TaskError::AlreadyCompleted(_) => Self::Conflict(task_err.to_string()),
            };
        }

        if let Some(user_err) = err.downcast_ref::<UserError>() {
            return match user_err {
                UserError::Invalid(msg) => Self::BadRequest(msg.clone()),
                UserError::AlreadyExists => Self::Conflict(user_err.to_string()),
                UserError::InvalidCredentials => Self::Unauthorized,
            };
        }

        if let Some(date_err) = err.downcast_ref::<DateParseError>() {
            return Self::BadRequest(date_err.to_string());
        }

        Self::Internal(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<DateParseError> for ApiError {
    fn from(err: DateParseError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(err) => {
                log::error!("Request failed: {:#}", err);
                "internal server error".to_string()
            }
            Self::Unauthorized => "authentication required".to_string(),
            other => other.to_string(),
        };

        (self.status(), Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TaskError::Invalid("bad".into()).into(), StatusCode::BAD_REQUEST ; "invalid task")]
    #[test_case(TaskError::NotFound(3).into(), StatusCode::NOT_FOUND ; "missing task")]
    #[test_case(TaskError::AlreadyCompleted(3).into(), StatusCode::CONFLICT ; "completed task")]
    #[test_case(UserError::AlreadyExists.into(), StatusCode::CONFLICT ; "duplicate user")]
    #[test_case(UserError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED ; "bad login")]
    #[test_case(DateParseError::Empty.into(), StatusCode::BAD_REQUEST ; "empty deadline")]
    #[test_case(DateParseError::OutOfRange("x".into()).into(), StatusCode::BAD_REQUEST ; "year")]
    #[test_case(anyhow::anyhow!("disk on fire"), StatusCode::INTERNAL_SERVER_ERROR ; "unexpected")]
    fn test_status_mapping(err: anyhow::Error, expected: StatusCode) {
        assert_eq!(ApiError::from(err).status(), expected);
    }

    #[test]
    fn test_mapping_survives_context() {
        let err = anyhow::Error::new(TaskError::NotFound(9)).context("while completing");
        assert_eq!(ApiError::from(err).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let response = ApiError::Internal(anyhow::anyhow!("secret path /etc")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use super::error::ApiError;
use super::AppState;
use crate::models::user::User;
use crate::services::auth::{Session, SessionService};
use crate::services::user::UserService;

/// The authenticated caller of one request.
///
/// Resolved from the `Authorization: Bearer <token>` header on every
/// request; nothing about the login is remembered between requests.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session: Session,
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let now = state.now();

        let resolved = state.with_db(|db| {
            let Some(session) = SessionService::new(db.connection()).resolve(token, now)? else {
                return Ok(None);
            };
            let user = UserService::new(db.connection(), state.verifier()).get(session.user_id)?;
            Ok(user.map(|user| CurrentUser { user, session }))
        })?;

        resolved.ok_or(ApiError::Unauthorized)
    }
}

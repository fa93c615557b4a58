use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::CurrentUser;
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use super::AppState;
use crate::models::task::{NewTask, ReminderType, Task};
use crate::models::user::{Registration, User};
use crate::services::auth::SessionService;
use crate::services::countdown::{CountdownService, Dashboard, TaskBoard, TaskCountdown};
use crate::services::task::TaskService;
use crate::services::user::UserService;
use crate::utils::date::parse_deadline;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339, or a local `YYYY-MM-DDTHH:MM[:SS]` read in the server's zone.
    pub deadline: String,
    pub reminder_type: String,
    /// Minutes between reminders.
    pub reminder_interval: u32,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let form = Registration {
        username: body.username,
        email: body.email,
        password: body.password,
        confirm_password: body.confirm_password,
    };

    let now = state.now();
    let user = state.with_db(|db| {
        UserService::new(db.connection(), state.verifier())
            .register(&form, now)
    })?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let now = state.now();
    let ttl = state.session_ttl();

    let (user, session) = state.with_db(|db| {
        let user = UserService::new(db.connection(), state.verifier())
            .login(&body.email, &body.password)?;
        let session = SessionService::new(db.connection())
            .create(user.id, now, ttl)?;
        Ok((user, session))
    })?;

    Ok(Json(LoginResponse {
        token: session.token,
        user,
        expires_at: session.expires_at,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.with_db(|db| {
        SessionService::new(db.connection())
            .revoke(&current.session.token)
    })?;
    log::info!("User {} logged out", current.user.id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Dashboard>, ApiError> {
    let now = state.now();
    let dashboard = state.with_db(|db| {
        CountdownService::new(db.connection())
            .dashboard(current.user.id, now)
    })?;
    Ok(Json(dashboard))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<TaskBoard>, ApiError> {
    let now = state.now();
    let board = state.with_db(|db| {
        CountdownService::new(db.connection())
            .task_board(current.user.id, now)
    })?;
    Ok(Json(board))
}

pub async fn create_task(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(body): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskCountdown>), ApiError> {
    let deadline = parse_deadline(&body.deadline, state.timezone())?;
    let reminder_type = body
        .reminder_type
        .parse::<ReminderType>()
        .map_err(ApiError::BadRequest)?;

    let mut task = NewTask::new(body.title, deadline, reminder_type, body.reminder_interval)
        .map_err(ApiError::BadRequest)?;
    if let Some(description) = body.description {
        task = task.with_description(description);
    }

    let now = state.now();
    let created = state.with_db(|db| {
        TaskService::new(db.connection())
            .create(current.user.id, task, now)
    })?;
    Ok((
        StatusCode::CREATED,
        Json(TaskCountdown::evaluate(created, now)),
    ))
}

pub async fn complete_task(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state.with_db(|db| {
        TaskService::new(db.connection())
            .complete(current.user.id, id)
    })?;
    Ok(Json(task))
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use roster_core::api::ApiResponse;
use roster_core::changeset::ChangeSet;
use roster_core::policy::{Action, authorize};
use roster_core::user::{Identity, LoginRequest, NewUser, UserRecord, UserSummary};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Successful login payload: the bearer token plus the authenticated user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserRecord>>)> {
    let user = state.directory.register(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let user = state
        .directory
        .authenticate(&request.username, &request.password)
        .await?;

    let token = state
        .tokens
        .issue(&user.username, user.is_admin)
        .map_err(|_| AppError::internal("Failed to issue token"))?;

    Ok(Json(ApiResponse::success(LoginResponse { token, user })))
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<ApiResponse<Vec<UserSummary>>>> {
    authorize(Action::ListUsers, &identity, None)?;

    let users = state.directory.list_all().await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> AppResult<Json<ApiResponse<UserRecord>>> {
    authorize(Action::GetUser, &identity, Some(&username))?;

    let user = state.directory.get_by_username(&username).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
    Json(changes): Json<ChangeSet>,
) -> AppResult<Json<ApiResponse<UserRecord>>> {
    authorize(Action::UpdateUser, &identity, Some(&username))?;

    let user = state
        .directory
        .apply_partial_update(&username, &changes)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    authorize(Action::DeleteUser, &identity, Some(&username))?;

    state.directory.delete(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

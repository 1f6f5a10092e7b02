use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};

use crate::{
    application::accounts::dto::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse},
    domain::{account::entity::AccountProfile, identity::entity::Role},
    presentation::http::{errors::AppError, middleware::caller::caller_credentials, state::AppState},
};

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let admin = if body.role == Some(Role::Admin) {
        Some(
            state
                .identity
                .require_privileged(&caller_credentials(&headers))?,
        )
    } else {
        None
    };

    let response = state.accounts.register(admin.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(state.accounts.login(body).await?))
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AccountProfile>, AppError> {
    let account_id = state
        .identity
        .require_account(&caller_credentials(&headers))?;
    Ok(Json(state.accounts.me(account_id).await?))
}

pub async fn list_admins(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AccountProfile>>, AppError> {
    let admin = state
        .identity
        .require_privileged(&caller_credentials(&headers))?;
    Ok(Json(state.accounts.list_admins(&admin).await?))
}

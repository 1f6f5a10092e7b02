use axum::{Json, extract::State};

use crate::{
    application::accounts::dto::{
        CheckUsernameRequest, GuestAuthRequest, GuestAuthResponse, UsernameAvailability,
    },
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn guest_auth(
    State(state): State<AppState>,
    Json(body): Json<GuestAuthRequest>,
) -> Result<Json<GuestAuthResponse>, AppError> {
    Ok(Json(state.accounts.guest_auth(body).await?))
}

pub async fn check_username(
    State(state): State<AppState>,
    Json(body): Json<CheckUsernameRequest>,
) -> Result<Json<UsernameAvailability>, AppError> {
    Ok(Json(state.accounts.check_username(body).await?))
}

use axum::{Extension, Json};

use super::extract::ApiJson;
use crate::{
    error::{BlindifyError, RouteError},
    server::AppState,
    types::{
        LoginUrlResponse, MessageResponse, RefreshedToken, SessionRequest, TokenGrant,
        TokenRequest,
    },
};

pub async fn login_url(
    Extension(state): Extension<AppState>,
) -> Result<Json<LoginUrlResponse>, BlindifyError> {
    let login_url = state.auth.login_url()?;
    Ok(Json(LoginUrlResponse { login_url }))
}

pub async fn exchange_token(
    Extension(state): Extension<AppState>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<TokenGrant>, RouteError> {
    state
        .auth
        .exchange_code(&request.code)
        .await
        .map(Json)
        .map_err(|e| RouteError::new("Failed to exchange token", e))
}

pub async fn refresh_token(
    Extension(state): Extension<AppState>,
    ApiJson(request): ApiJson<SessionRequest>,
) -> Result<Json<RefreshedToken>, BlindifyError> {
    Ok(Json(state.auth.refresh(&request.user_id).await?))
}

pub async fn logout(
    Extension(state): Extension<AppState>,
    ApiJson(request): ApiJson<SessionRequest>,
) -> Json<MessageResponse> {
    state.auth.logout(&request.user_id).await;
    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

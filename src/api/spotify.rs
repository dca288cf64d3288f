use axum::{Extension, Json, extract::Path};
use serde_json::Value;

use super::extract::ApiQuery;
use crate::{
    error::RouteError,
    server::AppState,
    spotify::{playlists, tracks, user},
    types::{AccessTokenQuery, Collection, NormalizedTrack},
};

pub async fn user_playlists(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<AccessTokenQuery>,
) -> Result<Json<Collection<Value>>, RouteError> {
    playlists::get_user_playlists(&state.client, &query.access_token)
        .await
        .map(Json)
        .map_err(|e| RouteError::new("Failed to fetch playlists", e))
}

pub async fn playlist_tracks(
    Extension(state): Extension<AppState>,
    Path(playlist_id): Path<String>,
    ApiQuery(query): ApiQuery<AccessTokenQuery>,
) -> Result<Json<Collection<NormalizedTrack>>, RouteError> {
    tracks::get_playlist_tracks(&state.client, &query.access_token, &playlist_id)
        .await
        .map(Json)
        .map_err(|e| RouteError::new("Failed to fetch tracks", e))
}

pub async fn track_details(
    Extension(state): Extension<AppState>,
    Path(track_id): Path<String>,
    ApiQuery(query): ApiQuery<AccessTokenQuery>,
) -> Result<Json<NormalizedTrack>, RouteError> {
    tracks::get_track_details(&state.client, &query.access_token, &track_id)
        .await
        .map(Json)
        .map_err(|e| RouteError::new("Failed to fetch track details", e))
}

pub async fn user_profile(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<AccessTokenQuery>,
) -> Result<Json<Value>, RouteError> {
    user::get_user_profile(&state.client, &query.access_token)
        .await
        .map(Json)
        .map_err(|e| RouteError::new("Failed to fetch user profile", e))
}

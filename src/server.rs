use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    config::Settings,
    info,
    management::{MemoryTokenStore, TokenStore},
    spotify::{SpotifyAuth, SpotifyClient},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<SpotifyAuth>,
    pub client: SpotifyClient,
}

impl AppState {
    /// Wires the auth flow and API client from `settings`, keeping sessions
    /// in `store`.
    pub fn new(settings: &Settings, store: Arc<dyn TokenStore>) -> Self {
        let http = reqwest::Client::new();
        Self {
            auth: Arc::new(SpotifyAuth::new(http.clone(), settings, store)),
            client: SpotifyClient::new(http, settings.api_url.clone()),
        }
    }
}

/// Builds the complete router with permissive CORS.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login-url", get(api::login_url))
        .route("/token", post(api::exchange_token))
        .route("/refresh", post(api::refresh_token))
        .route("/logout", post(api::logout));

    let spotify_routes = Router::new()
        .route("/playlists", get(api::user_playlists))
        .route("/playlist/{playlist_id}/tracks", get(api::playlist_tracks))
        .route("/track/{track_id}", get(api::track_details))
        .route("/user", get(api::user_profile));

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .nest("/api/auth", auth_routes)
        .nest("/api/spotify", spotify_routes)
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

/// Binds `settings.server_address` and serves until the process ends.
///
/// Sessions live in a [`MemoryTokenStore`] and are lost on shutdown.
pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_address)?;
    let state = AppState::new(&settings, Arc::new(MemoryTokenStore::new()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Blindify API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

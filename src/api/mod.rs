//! # API Module
//!
//! This module provides the HTTP endpoints of the Blindify backend. Handlers are
//! thin: they extract the request, call into [`crate::spotify`] and let the error
//! types render failures as JSON bodies with a matching status code.
//!
//! ## Endpoints
//!
//! ### Authentication (`/api/auth`)
//!
//! - [`login_url`] - `GET /login-url`, the Spotify consent URL
//! - [`exchange_token`] - `POST /token`, trades `{ code }` for an access token and a `user_id`
//! - [`refresh_token`] - `POST /refresh`, trades `{ user_id }` for a fresh access token
//! - [`logout`] - `POST /logout`, forgets the session of `{ user_id }`
//!
//! ### Spotify (`/api/spotify`)
//!
//! Every endpoint expects the caller's token as `?access_token=`. A missing
//! token or a malformed body is answered with `{ "error": ... }` like any
//! other failure.
//!
//! - [`user_playlists`] - `GET /playlists`, all playlists of the user
//! - [`playlist_tracks`] - `GET /playlist/{id}/tracks`, all playable tracks, normalized
//! - [`track_details`] - `GET /track/{id}`, one normalized track
//! - [`user_profile`] - `GET /user`, the raw Spotify profile
//!
//! ### Monitoring
//!
//! - [`root`] - Welcome message
//! - [`health`] - Status and version information
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use blindify::api::{health, login_url};
//!
//! let app = Router::new()
//!     .route("/login-url", get(login_url))
//!     .route("/health", get(health));
//! ```

mod auth;
mod extract;
mod health;
mod spotify;

pub use auth::{exchange_token, login_url, logout, refresh_token};
pub use health::{health, root};
pub use spotify::{playlist_tracks, track_details, user_playlists, user_profile};

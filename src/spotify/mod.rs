//! # Spotify Integration Module
//!
//! This module provides the interface to Spotify's accounts service and Web API
//! used by the Blindify backend. It handles the authorization-code flow with
//! client-secret authentication, the session lifecycle built on top of it, and the
//! paginated read endpoints whose payloads are reshaped for the frontend.
//!
//! ## Architecture
//!
//! ```text
//! HTTP Handlers (api)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, code exchange, refresh, logout)
//!     ├── Pagination (offset/limit walks with short-page termination)
//!     ├── Playlists (raw playlist objects)
//!     ├── Tracks (normalized track schema)
//!     └── User (raw profile)
//!          ↓
//! Web API Client (reqwest, bearer auth, error translation)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the server side of the OAuth 2.0 authorization-code flow:
//! - **Login URL**: Builds the consent URL with `show_dialog=true`
//! - **Code Exchange**: Trades the single-use code for tokens using HTTP Basic client auth
//! - **Sessions**: Stores the refresh token encrypted, keyed by a short user identifier
//! - **Refresh**: Mints new access tokens and follows refresh-token rotation
//! - **Logout**: Drops the stored session
//!
//! ### Client Module
//!
//! [`client`] - A stateless Web API client. The access token travels with every
//! call, so one client and one connection pool serve all requests.
//!
//! ### Pagination Module
//!
//! [`pagination`] - The generic offset/limit walk. Stops when the reported total
//! is reached or when a page comes back short, whichever happens first.
//!
//! ### Playlists and Tracks
//!
//! [`playlists`] and [`tracks`] - Assemble complete collections before returning.
//! Tracks are normalized: `null` entries are dropped, artists reduced to names and
//! the release year derived from the album's release date.
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user's profile
//! - `GET /me/playlists` - Current user's playlists
//! - `GET /playlists/{id}/tracks` - Playlist entries, restricted with `fields`
//! - `GET /tracks/{id}` - Single track details
//! - `POST /api/token` - Code exchange and token refresh (accounts service)
//!
//! ## Error Handling Philosophy
//!
//! Nothing is retried. The first upstream failure is translated into a
//! [`crate::error::BlindifyError`] and surfaced; a failing page aborts the whole
//! collection, so callers never see partial results.

pub mod auth;
pub mod client;
pub mod pagination;
pub mod playlists;
pub mod tracks;
pub mod user;

pub use auth::SpotifyAuth;
pub use client::SpotifyClient;

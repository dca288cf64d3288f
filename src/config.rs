//! Configuration management for the Blindify backend.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Unlike a set of free-standing getters, everything is
//! collected once into an explicit [`Settings`] struct that is handed to the
//! components that need it, so there is no hidden process-wide state.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)

use std::{env, fmt};

use crate::{
    error::{BlindifyError, Result},
    management::{EncryptionKey, TokenCipher},
    warning,
};

/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Default Spotify accounts service base URL.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com";

/// Redirect URI used when `SPOTIFY_REDIRECT_URI` is unset.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/callback";

/// Address the HTTP server binds to when `SERVER_ADDRESS` is unset.
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";

/// Scopes requested during authorization, in transport order.
pub const DEFAULT_SCOPES: [&str; 7] = [
    "user-read-private",
    "user-read-email",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-modify-playback-state",
    "user-read-playback-state",
    "streaming",
];

/// Loads environment variables from a `.env` file in the working directory.
///
/// A missing `.env` file is not an error: the service is expected to run with
/// plain environment variables in most deployments.
///
/// # Returns
///
/// Returns `true` if a `.env` file was found and loaded.
///
/// # Example
///
/// ```
/// use blindify::config;
///
/// if !config::load_env() {
///     println!("No .env file, using process environment only");
/// }
/// ```
pub fn load_env() -> bool {
    dotenv::dotenv().is_ok()
}

/// Spotify application credentials.
///
/// Empty values are accepted at load time; the operations that need them
/// fail with [`BlindifyError::Config`] instead, so a partially configured
/// server can still answer health checks.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl Credentials {
    /// Scopes joined with single spaces, as the authorize endpoint expects.
    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }

    /// Ensures the client identifier is set.
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Config`] if `client_id` is empty.
    pub fn require_client_id(&self) -> Result<&str> {
        if self.client_id.is_empty() {
            return Err(BlindifyError::Config(
                "Spotify client ID not configured".to_string(),
            ));
        }
        Ok(&self.client_id)
    }

    /// Ensures both halves of the client credentials are set.
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Config`] if either value is empty.
    pub fn require_client_credentials(&self) -> Result<(&str, &str)> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(BlindifyError::Config(
                "Spotify credentials not configured".to_string(),
            ));
        }
        Ok((&self.client_id, &self.client_secret))
    }
}

/// All runtime settings of the service.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    /// Base URL of the Spotify Web API, without trailing slash.
    pub api_url: String,
    /// Base URL of the Spotify accounts service, without trailing slash.
    pub auth_url: String,
    /// Key protecting stored refresh tokens.
    pub encryption_key: EncryptionKey,
    pub server_address: String,
}

impl Settings {
    /// Builds the settings from the process environment.
    ///
    /// Reads the following variables:
    ///
    /// - `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` (default empty)
    /// - `SPOTIFY_REDIRECT_URI` (default [`DEFAULT_REDIRECT_URI`])
    /// - `SPOTIFY_SCOPES` space separated (default [`DEFAULT_SCOPES`])
    /// - `SPOTIFY_API_URL`, `SPOTIFY_AUTH_URL`
    /// - `TOKEN_ENCRYPTION_KEY` base64 or hex encoded 32-byte key
    /// - `SERVER_ADDRESS` (default [`DEFAULT_SERVER_ADDRESS`])
    ///
    /// When `TOKEN_ENCRYPTION_KEY` is absent a key is generated for this
    /// process only. It is never written anywhere, so every stored session
    /// is lost on restart.
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Config`] if `TOKEN_ENCRYPTION_KEY` is set but
    /// cannot be parsed into a 32-byte key.
    pub fn from_env() -> Result<Self> {
        let encryption_key = match non_empty_var("TOKEN_ENCRYPTION_KEY") {
            Some(raw) => EncryptionKey::parse(&raw)?,
            None => {
                warning!(
                    "TOKEN_ENCRYPTION_KEY not set, generated an ephemeral key. Sessions will not survive a restart."
                );
                TokenCipher::generate_key()
            }
        };

        let scopes = match non_empty_var("SPOTIFY_SCOPES") {
            Some(raw) => raw.split_whitespace().map(str::to_string).collect(),
            None => DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            credentials: Credentials {
                client_id: env::var("SPOTIFY_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri: var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
                scopes,
            },
            api_url: trim_base(var_or("SPOTIFY_API_URL", DEFAULT_API_URL)),
            auth_url: trim_base(var_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)),
            encryption_key,
            server_address: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }

    /// Settings pointing both Spotify services at `base_url`.
    ///
    /// Mostly useful for tests running against a local mock server.
    pub fn for_base_url(base_url: &str, credentials: Credentials, key: EncryptionKey) -> Self {
        Self {
            credentials,
            api_url: trim_base(base_url.to_string()),
            auth_url: trim_base(base_url.to_string()),
            encryption_key: key,
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    non_empty_var(name).unwrap_or_else(|| default.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

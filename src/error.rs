use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the token lifecycle and the Spotify proxy.
///
/// Every variant maps onto exactly one HTTP status through [`IntoResponse`],
/// so handlers can propagate with `?` and never build error bodies by hand.
#[derive(Debug, Error)]
pub enum BlindifyError {
    /// Credentials or other required settings are missing or invalid.
    #[error("{0}")]
    Config(String),

    /// The accounts service refused the authorization-code exchange.
    #[error("Token exchange failed (Status: {status})")]
    TokenExchange { status: u16 },

    /// No refresh token is stored for the given user identifier.
    #[error("No refresh token found. Please log in again.")]
    SessionNotFound,

    /// The accounts service refused the stored refresh token.
    #[error("Refresh token expired. Please log in again.")]
    SessionExpired,

    /// A refresh token could not be sealed for storage.
    #[error("Refresh token could not be encrypted: {0}")]
    Encryption(String),

    /// A stored refresh token could not be decrypted with the current key.
    #[error("Stored refresh token could not be decrypted: {0}")]
    Decryption(String),

    /// The Spotify Web API answered with an error status.
    #[error("Spotify API error: {message} (Status: {status})")]
    Api { message: String, status: u16 },

    /// The API client was asked for a method it does not speak.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The incoming request could not be extracted (bad JSON body, missing
    /// query parameter).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String, status: u16 },

    /// An upstream payload lacked a field the service relies on.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Transport failure talking to Spotify.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse or serialize JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with `BlindifyError`.
pub type Result<T> = std::result::Result<T, BlindifyError>;

impl BlindifyError {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Encryption(_) | Self::UnsupportedMethod(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::TokenExchange { status } | Self::Api { status, .. } => {
                upstream_status(*status)
            }
            Self::SessionNotFound | Self::SessionExpired | Self::Decryption(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidRequest { status, .. } => match StatusCode::from_u16(*status) {
                Ok(code) if code.is_client_error() => code,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::MalformedResponse(_) | Self::Http(_) | Self::Json(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for BlindifyError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
            status: rejection.status().as_u16(),
        }
    }
}

impl From<QueryRejection> for BlindifyError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
            status: rejection.status().as_u16(),
        }
    }
}

/// Upstream statuses are forwarded as-is when they describe an error,
/// anything else collapses to 500.
fn upstream_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for BlindifyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A [`BlindifyError`] carrying the route-specific context it is reported
/// with, e.g. `Failed to fetch playlists: ...`.
#[derive(Debug)]
pub struct RouteError {
    context: &'static str,
    source: BlindifyError,
}

impl RouteError {
    pub fn new(context: &'static str, source: BlindifyError) -> Self {
        Self { context, source }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.source.status_code();
        let message = format!("{}: {}", self.context, self.source);
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            BlindifyError::Config("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BlindifyError::SessionNotFound.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BlindifyError::Decryption("bad tag".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BlindifyError::Api {
                message: "Invalid access token".into(),
                status: 401
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BlindifyError::TokenExchange { status: 400 }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_non_error_upstream_status_collapses_to_500() {
        assert_eq!(
            BlindifyError::TokenExchange { status: 204 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BlindifyError::TokenExchange { status: 42 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_request_status() {
        let err = BlindifyError::InvalidRequest {
            message: "Expected request with `Content-Type: application/json`".into(),
            status: 415,
        };
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let err = BlindifyError::InvalidRequest {
            message: "odd".into(),
            status: 500,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_message() {
        let err = BlindifyError::Api {
            message: "Unknown error".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Spotify API error: Unknown error (Status: 503)");
    }

    #[tokio::test]
    async fn test_route_error_body_carries_context() {
        let response = RouteError::new(
            "Failed to fetch playlists",
            BlindifyError::Api {
                message: "Invalid access token".into(),
                status: 401,
            },
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["error"],
            "Failed to fetch playlists: Spotify API error: Invalid access token (Status: 401)"
        );
    }
}

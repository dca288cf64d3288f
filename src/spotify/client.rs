use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BlindifyError, Result};

/// Message reported when an upstream error body carries none.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Stateless client for the Spotify Web API.
///
/// The access token is passed with every call instead of being bound at
/// construction, so a single instance (and its connection pool) is shared by
/// all requests of the server.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new(reqwest::Client::new(), "https://api.spotify.com/v1");
/// let profile = client.request(&token, Method::GET, "/me", &[], None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sends an authenticated request and returns the decoded JSON body.
    ///
    /// `GET` sends `query` as the query string; `POST` and `PUT` send `body`
    /// as JSON. An empty success body decodes to `Value::Null`.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Bearer token supplied by the caller
    /// * `method` - One of `GET`, `POST`, `PUT`
    /// * `path` - Path below the API base, starting with `/`
    /// * `query` - Query parameters, only used for `GET`
    /// * `body` - JSON body, only used for `POST` and `PUT`
    ///
    /// # Errors
    ///
    /// - [`BlindifyError::UnsupportedMethod`] for any other method, before any I/O
    /// - [`BlindifyError::Api`] when Spotify answers with a status of 400 or above,
    ///   carrying `error.message` from the body or `"Unknown error"`
    /// - [`BlindifyError::Http`] / [`BlindifyError::Json`] on transport or decoding failures
    pub async fn request(
        &self,
        access_token: &str,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let builder = if method == Method::GET {
            self.http.get(&url).query(query)
        } else if method == Method::POST || method == Method::PUT {
            let builder = self.http.request(method, &url);
            match body {
                Some(json) => builder.json(json),
                None => builder.json(&Value::Object(Default::default())),
            }
        } else {
            return Err(BlindifyError::UnsupportedMethod(method.to_string()));
        };

        let response = builder.bearer_auth(access_token).send().await?;
        Self::decode(response).await
    }

    /// `GET` a path and deserialize the body into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::request`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let value = self
            .request(access_token, Method::GET, path, query, None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn decode(response: Response) -> Result<Value> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.as_u16() >= 400 {
            return Err(BlindifyError::Api {
                message: error_message(&bytes),
                status: status.as_u16(),
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Extracts `error.message` from an upstream error body.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        let body = br#"{"error":{"status":401,"message":"The access token expired"}}"#;
        assert_eq!(error_message(body), "The access token expired");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(b""), "Unknown error");
        assert_eq!(error_message(b"<html>bad gateway</html>"), "Unknown error");
        assert_eq!(error_message(br#"{"error":"invalid_grant"}"#), "Unknown error");
    }

    #[tokio::test]
    async fn test_unsupported_method_fails_without_io() {
        let client = SpotifyClient::new(Client::new(), "http://127.0.0.1:9");
        let err = client
            .request("token", Method::DELETE, "/me", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, BlindifyError::UnsupportedMethod(m) if m == "DELETE"));
    }
}

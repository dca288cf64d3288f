use std::sync::Arc;

use reqwest::{Client, StatusCode, Url};

use crate::{
    config::{Credentials, Settings},
    error::{BlindifyError, Result},
    info,
    management::{TokenCipher, TokenStore, UserId},
    success,
    types::{RefreshedToken, TokenGrant, TokenResponse},
    warning,
};

/// Server-side half of the Spotify authorization-code flow.
///
/// Owns everything the flow needs: client credentials, the cipher sealing
/// refresh tokens, and the store holding them. Access tokens are never kept;
/// they are returned to the caller, who presents them on every API call.
///
/// # Session Model
///
/// A session is one encrypted refresh token stored under a [`UserId`] derived
/// from the token's first characters. The caller keeps the `UserId` and uses
/// it for [`SpotifyAuth::refresh`] and [`SpotifyAuth::logout`]; nothing else
/// links a caller to its session.
///
/// # Example
///
/// ```
/// let auth = SpotifyAuth::new(reqwest::Client::new(), &settings, Arc::new(MemoryTokenStore::new()));
/// let url = auth.login_url()?;
/// // ... user consents, frontend receives `code` ...
/// let grant = auth.exchange_code(&code).await?;
/// let fresh = auth.refresh(&grant.user_id).await?;
/// auth.logout(&grant.user_id).await;
/// ```
pub struct SpotifyAuth {
    http: Client,
    credentials: Credentials,
    auth_url: String,
    cipher: TokenCipher,
    store: Arc<dyn TokenStore>,
}

impl SpotifyAuth {
    pub fn new(http: Client, settings: &Settings, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            credentials: settings.credentials.clone(),
            auth_url: settings.auth_url.clone(),
            cipher: TokenCipher::new(&settings.encryption_key),
            store,
        }
    }

    /// Builds the URL the browser is sent to for consent.
    ///
    /// The URL targets `{auth_url}/authorize` with `client_id`,
    /// `response_type=code`, `redirect_uri`, the space-joined `scope` and
    /// `show_dialog=true`, which forces the consent screen even for users
    /// who already granted access.
    ///
    /// # Errors
    ///
    /// Returns [`BlindifyError::Config`] if the client id is not configured.
    pub fn login_url(&self) -> Result<String> {
        let client_id = self.credentials.require_client_id()?;
        let scope = self.credentials.scope();

        let url = Url::parse_with_params(
            &format!("{}/authorize", self.auth_url),
            &[
                ("client_id", client_id),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("show_dialog", "true"),
            ],
        )
        .map_err(|e| BlindifyError::Config(format!("Invalid Spotify auth URL: {e}")))?;

        Ok(url.into())
    }

    /// Exchanges an authorization code for tokens and opens a session.
    ///
    /// The refresh token is encrypted and stored under the derived
    /// [`UserId`]; an existing session with the same id is overwritten.
    ///
    /// # Arguments
    ///
    /// * `code` - Single-use authorization code from the consent redirect
    ///
    /// # Returns
    ///
    /// Returns the access token, its lifetime and the `UserId` the caller
    /// must keep for refresh and logout.
    ///
    /// # Errors
    ///
    /// - [`BlindifyError::Config`] if client id or secret is missing
    /// - [`BlindifyError::TokenExchange`] if the accounts service does not answer 200
    /// - [`BlindifyError::MalformedResponse`] if no refresh token was issued
    /// - [`BlindifyError::Http`] on transport failures
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        let (client_id, client_secret) = self.credentials.require_client_credentials()?;

        let response = self
            .http
            .post(self.token_url())
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warning!("Authorization code exchange rejected (Status: {})", status);
            return Err(BlindifyError::TokenExchange {
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response.json().await?;
        let refresh_token = token.refresh_token.ok_or_else(|| {
            BlindifyError::MalformedResponse("token response has no refresh_token".to_string())
        })?;

        let user_id = UserId::from_refresh_token(&refresh_token);
        let sealed = self.cipher.encrypt(&refresh_token)?;
        self.store.put(user_id.clone(), sealed).await;
        success!("Session {} opened", user_id);

        Ok(TokenGrant {
            access_token: token.access_token,
            expires_in: token.expires_in,
            user_id,
        })
    }

    /// Mints a new access token from the session's refresh token.
    ///
    /// If Spotify rotates the refresh token, the stored one is replaced.
    /// Earlier access tokens are not tracked and stay valid until Spotify
    /// expires them.
    ///
    /// # Errors
    ///
    /// - [`BlindifyError::SessionNotFound`] if no session exists for `user_id`,
    ///   or its token no longer decrypts (the stale entry is removed)
    /// - [`BlindifyError::Config`] if client id or secret is missing
    /// - [`BlindifyError::SessionExpired`] if Spotify refuses the refresh token;
    ///   the session is removed and the user must log in again
    /// - [`BlindifyError::Http`] on transport failures, leaving the session intact
    pub async fn refresh(&self, user_id: &UserId) -> Result<RefreshedToken> {
        let sealed = self
            .store
            .get(user_id)
            .await
            .ok_or(BlindifyError::SessionNotFound)?;

        let refresh_token = match self.cipher.decrypt(&sealed) {
            Ok(token) => token,
            Err(e) => {
                warning!("Dropping session {}: {}", user_id, e);
                self.store.delete(user_id).await;
                return Err(BlindifyError::SessionNotFound);
            }
        };

        let (client_id, client_secret) = self.credentials.require_client_credentials()?;

        let response = self
            .http
            .post(self.token_url())
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            self.store.delete(user_id).await;
            warning!(
                "Refresh for session {} rejected (Status: {}), session removed",
                user_id,
                status
            );
            return Err(BlindifyError::SessionExpired);
        }

        let token: TokenResponse = response.json().await?;
        if let Some(rotated) = token.refresh_token {
            let sealed = self.cipher.encrypt(&rotated)?;
            self.store.put(user_id.clone(), sealed).await;
            info!("Session {} rotated its refresh token", user_id);
        }

        Ok(RefreshedToken {
            access_token: token.access_token,
            expires_in: token.expires_in,
        })
    }

    /// Removes the session. Unknown ids are ignored.
    pub async fn logout(&self, user_id: &UserId) {
        if self.store.delete(user_id).await {
            success!("Session {} closed", user_id);
        }
    }

    fn token_url(&self) -> String {
        format!("{}/api/token", self.auth_url)
    }
}

use serde_json::Value;

use super::SpotifyClient;
use crate::error::Result;

/// Retrieves the current user's profile as Spotify returns it.
pub async fn get_user_profile(client: &SpotifyClient, access_token: &str) -> Result<Value> {
    client.get(access_token, "/me", &[]).await
}

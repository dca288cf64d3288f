use serde_json::Value;

use super::{
    SpotifyClient,
    pagination::{page_query, paginate},
};
use crate::{
    error::Result,
    types::{Collection, Paging},
};

/// Page size used when walking the user's playlists.
pub const PLAYLIST_PAGE_LIMIT: u64 = 50;

/// Retrieves every playlist of the current user.
///
/// Walks `GET /me/playlists` in pages of [`PLAYLIST_PAGE_LIMIT`] and returns
/// the simplified playlist objects exactly as Spotify sends them.
///
/// # Arguments
///
/// * `client` - Shared Web API client
/// * `access_token` - Access token of the user
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Collection<Value>)` - All playlists and the total reported by Spotify
/// - `Err(BlindifyError)` - The first failing page; nothing partial is returned
///
/// # Example
///
/// ```
/// let playlists = get_user_playlists(&client, &token).await?;
/// println!("{} playlists", playlists.total);
/// ```
pub async fn get_user_playlists(
    client: &SpotifyClient,
    access_token: &str,
) -> Result<Collection<Value>> {
    paginate(PLAYLIST_PAGE_LIMIT, |offset| {
        let query = page_query(PLAYLIST_PAGE_LIMIT, offset);
        async move {
            client
                .get::<Paging<Value>>(access_token, "/me/playlists", &query)
                .await
        }
    })
    .await
}

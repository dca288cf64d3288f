use super::{
    SpotifyClient,
    pagination::{page_query, paginate},
};
use crate::{
    error::{BlindifyError, Result},
    types::{Collection, NormalizedAlbum, NormalizedTrack, Paging, PlaylistTrackItem, Track},
};

/// Page size used when walking the tracks of a playlist.
pub const TRACK_PAGE_LIMIT: u64 = 100;

/// Field filter limiting playlist-track pages to what normalization reads.
pub const PLAYLIST_TRACK_FIELDS: &str =
    "items(track(id,name,artists(name),album(name,release_date,images))),total";

/// Release year reported when an album has no release date.
pub const UNKNOWN_RELEASE_YEAR: &str = "Unknown";

/// Retrieves every playable track of a playlist in normalized form.
///
/// Walks `GET /playlists/{id}/tracks` in pages of [`TRACK_PAGE_LIMIT`],
/// requesting only the fields listed in [`PLAYLIST_TRACK_FIELDS`]. Entries
/// whose track is `null` (removed or unavailable tracks) or has no id (local
/// files) are dropped.
///
/// # Arguments
///
/// * `client` - Shared Web API client
/// * `access_token` - Access token of the user
/// * `playlist_id` - Spotify ID of the playlist
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Collection<NormalizedTrack>)` - Surviving tracks in playlist order; `total`
///   is their count, not the total reported by Spotify
/// - `Err(BlindifyError)` - The first failing page; nothing partial is returned
///
/// # Pagination
///
/// Short-page detection counts raw entries, holes included, so a page of
/// `TRACK_PAGE_LIMIT` entries with some `null` tracks does not end the walk.
///
/// # Example
///
/// ```
/// let tracks = get_playlist_tracks(&client, &token, "37i9dQZF1DXcBWIGoYBM5M").await?;
/// for track in tracks.items {
///     println!("{} - {}", track.artists.join(", "), track.name);
/// }
/// ```
pub async fn get_playlist_tracks(
    client: &SpotifyClient,
    access_token: &str,
    playlist_id: &str,
) -> Result<Collection<NormalizedTrack>> {
    let endpoint = format!("/playlists/{playlist_id}/tracks");
    let path = endpoint.as_str();

    let raw = paginate(TRACK_PAGE_LIMIT, |offset| {
        let mut query = page_query(TRACK_PAGE_LIMIT, offset);
        query.push(("fields", PLAYLIST_TRACK_FIELDS.to_string()));
        async move {
            client
                .get::<Paging<PlaylistTrackItem>>(access_token, path, &query)
                .await
        }
    })
    .await?;

    let items: Vec<NormalizedTrack> = raw
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(normalize_track)
        .collect();

    Ok(Collection {
        total: items.len() as u64,
        items,
    })
}

/// Retrieves a single track in normalized form.
///
/// # Errors
///
/// Returns [`BlindifyError::MalformedResponse`] if Spotify returns a track
/// without an id, besides the errors of [`SpotifyClient::request`].
///
/// # Example
///
/// ```
/// let track = get_track_details(&client, &token, "4uLU6hMCjMI75M1A2tKUQC").await?;
/// assert_eq!(track.uri, "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
/// ```
pub async fn get_track_details(
    client: &SpotifyClient,
    access_token: &str,
    track_id: &str,
) -> Result<NormalizedTrack> {
    let track: Track = client
        .get(access_token, &format!("/tracks/{track_id}"), &[])
        .await?;

    normalize_track(track)
        .ok_or_else(|| BlindifyError::MalformedResponse(format!("track {track_id} has no id")))
}

/// Reshapes a Spotify track into the frontend schema.
///
/// Returns `None` for tracks without an id, which cannot be addressed by URI.
pub fn normalize_track(track: Track) -> Option<NormalizedTrack> {
    let id = track.id?;
    let album = track.album.unwrap_or_default();
    let release_date = album.release_date.unwrap_or_default();

    Some(NormalizedTrack {
        uri: format!("spotify:track:{id}"),
        id,
        name: track.name.unwrap_or_default(),
        artists: track
            .artists
            .unwrap_or_default()
            .into_iter()
            .map(|a| a.name.unwrap_or_default())
            .collect(),
        album: NormalizedAlbum {
            name: album.name.unwrap_or_default(),
            release_year: release_year(&release_date),
            release_date,
            images: album.images.unwrap_or_default(),
        },
    })
}

/// Year part of a Spotify release date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
pub fn release_year(release_date: &str) -> String {
    match release_date.split('-').next() {
        Some(year) if !release_date.is_empty() => year.to_string(),
        _ => UNKNOWN_RELEASE_YEAR.to_string(),
    }
}

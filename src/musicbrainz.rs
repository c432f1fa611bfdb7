use crate::album::{AlbumRecord, TagSource, DEFAULT_ARTIST, DEFAULT_TITLE};
use crate::config::Config;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error("MusicBrainz API error: {0}")]
    Api(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Failed to parse JSON: {0}")]
    Json(String),
}

/// Releases lookup by DiscID (allows mocking for tests)
///
/// The response is nested as `disc → release-list → [release]`, each release
/// holding `title`, `artist-credit` and `medium-list → [track-list]`. Every
/// level may be missing.
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn releases_by_discid(&self, disc_id: &str) -> Result<Value, MusicBrainzError>;
}

/// MusicBrainz web service client
pub struct MusicBrainzClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl MusicBrainzClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, MusicBrainzError> {
        // Url::join drops the last path segment unless the base ends with '/'
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = reqwest::Url::parse(&base_url)
            .map_err(|e| MusicBrainzError::Api(format!("Failed to parse base URL: {}", e)))?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| MusicBrainzError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, MusicBrainzError> {
        Self::new(&config.musicbrainz_url, &config.user_agent)
    }

    /// `<base>/discid/<id>`, with the id escaped as one path segment
    fn discid_url(&self, disc_id: &str) -> Result<reqwest::Url, MusicBrainzError> {
        let mut url = self
            .base_url
            .join("discid")
            .map_err(|e| {
                MusicBrainzError::Api(format!("Failed to construct DiscID URL: {}", e))
            })?;
        url.path_segments_mut()
            .map_err(|_| MusicBrainzError::Api("Base URL cannot hold a path".to_string()))?
            .push(disc_id);
        url.set_query(Some("inc=artists+recordings+artist-credits"));
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ReleaseSource for MusicBrainzClient {
    async fn releases_by_discid(&self, disc_id: &str) -> Result<Value, MusicBrainzError> {
        let url = self.discid_url(disc_id)?;
        debug!("MusicBrainz API request: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MusicBrainzError::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!("MusicBrainz has no disc {}", disc_id);
            return Ok(json!({}));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(
                "MusicBrainz API error response ({}): {}",
                status, error_text
            );
            return Err(MusicBrainzError::Api(format!(
                "MusicBrainz API returned status {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| MusicBrainzError::Json(e.to_string()))?;

        Ok(json!({ "disc": body }))
    }
}

/// Array under the first key present, or an empty slice
///
/// The JSON web service and the nested list form name the same arrays
/// differently (`releases`/`release-list`, `media`/`medium-list`, ...).
fn list<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .find_map(|key| value.get(*key))
        .and_then(|v| v.as_array())
        .map(|a| a.as_slice())
        .unwrap_or_default()
}

/// Name of the first credited artist
fn credited_artist(value: &Value) -> Option<&str> {
    list(value, &["artist-credit"])
        .first()?
        .get("artist")?
        .get("name")?
        .as_str()
}

/// Convert one release into an album
///
/// Returns `None` when the release has no medium or its first medium has no
/// tracks.
pub fn release_to_album(release: &Value) -> Option<AlbumRecord> {
    let mut album = AlbumRecord::new(TagSource::MusicBrainz);
    album.album_title = release
        .get("title")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    album.album_artist = credited_artist(release)
        .unwrap_or(DEFAULT_ARTIST)
        .to_string();

    let tracks = list(release, &["medium-list", "media"])
        .first()
        .map(|medium| list(medium, &["track-list", "tracks"]))
        .unwrap_or_default();
    if tracks.is_empty() {
        return None;
    }

    for track in tracks {
        let title = track
            .get("recording")
            .and_then(|r| r.get("title"))
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_TITLE);
        // An empty artist falls back to the album artist
        let artist = credited_artist(track).unwrap_or("");
        album.add_track(title, artist);
    }

    album.check_multiple();
    Some(album)
}

/// Look up a disc and convert its first release into an album
///
/// `Ok(None)` means MusicBrainz knows no usable release for the disc.
/// Failures of the source are returned as errors and never retried.
pub async fn lookup(
    source: &dyn ReleaseSource,
    disc_id: &str,
) -> Result<Option<AlbumRecord>, MusicBrainzError> {
    info!("🎵 MusicBrainz: Looking up DiscID '{}'", disc_id);

    let response = source.releases_by_discid(disc_id).await?;
    let releases = response
        .get("disc")
        .map(|disc| list(disc, &["release-list", "releases"]))
        .unwrap_or_default();

    let Some(release) = releases.first() else {
        info!("No MusicBrainz release for DiscID {}", disc_id);
        return Ok(None);
    };
    if releases.len() > 1 {
        debug!(
            "MusicBrainz found {} releases for DiscID {}, using the first",
            releases.len(),
            disc_id
        );
    }

    let Some(mut album) = release_to_album(release) else {
        warn!("MusicBrainz release for DiscID {} has no tracks", disc_id);
        return Ok(None);
    };

    album.disc_id = Some(disc_id.to_string());
    album.check_multiple();

    info!(
        "✓ MusicBrainz: {} - {} ({} tracks)",
        album.album_artist,
        album.album_title,
        album.track_count()
    );
    Ok(Some(album))
}

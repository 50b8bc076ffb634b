use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Wrapper for Data API list responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Item from GET /search.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResultId {
    pub kind: Option<String>,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchSnippet {
    pub channel_id: Option<String>,
}

impl SearchResult {
    /// Channel id of a `type=channel` hit.
    pub fn channel_id(self) -> Option<String> {
        self.id
            .channel_id
            .or_else(|| self.snippet.and_then(|s| s.channel_id))
            .filter(|id| !id.is_empty())
    }

    /// Video id of a `type=video` hit.
    pub fn video_id(self) -> Option<String> {
        self.id.video_id.filter(|id| !id.is_empty())
    }
}

/// Item from GET /channels (part=snippet,statistics,contentDetails).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelResource {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(deserialize_with = "lenient_count")]
    pub subscriber_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub video_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

/// Item from GET /playlists (part=snippet,contentDetails).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistResource {
    pub id: String,
    pub snippet: TitleSnippet,
    pub content_details: PlaylistContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    #[serde(deserialize_with = "lenient_count")]
    pub item_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TitleSnippet {
    pub title: Option<String>,
}

/// Item from GET /videos (part=snippet,statistics).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VideoResource {
    pub id: String,
    pub snippet: TitleSnippet,
    pub statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub like_count: u64,
}

/// Item from GET /playlistItems (part=snippet,contentDetails).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemResource {
    pub snippet: PlaylistItemSnippet,
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub resource_id: ResourceId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: Option<String>,
}

/// Counts arrive as decimal strings; absent, null or non-numeric values read as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    })
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

/// Point-in-time channel snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub channel_id: String,
    pub title: Option<String>,
    /// `None` when the API omitted the timestamp or it did not parse.
    pub created_at: Option<DateTime<Utc>>,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
    pub uploads_playlist_id: Option<String>,
}

impl From<ChannelResource> for ChannelSummary {
    fn from(res: ChannelResource) -> Self {
        Self {
            channel_id: res.id,
            title: res.snippet.title,
            created_at: res.snippet.published_at.as_deref().and_then(parse_timestamp),
            subscriber_count: res.statistics.subscriber_count,
            video_count: res.statistics.video_count,
            view_count: res.statistics.view_count,
            uploads_playlist_id: res.content_details.related_playlists.uploads,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistMeta {
    pub playlist_id: String,
    pub title: String,
    pub item_count: u64,
}

impl From<PlaylistResource> for PlaylistMeta {
    fn from(res: PlaylistResource) -> Self {
        Self {
            playlist_id: res.id,
            title: res.snippet.title.unwrap_or_default(),
            item_count: res.content_details.item_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStat {
    pub video_id: String,
    pub title: String,
    pub view_count: u64,
    pub like_count: u64,
}

impl From<VideoResource> for VideoStat {
    fn from(res: VideoResource) -> Self {
        Self {
            video_id: res.id,
            title: res.snippet.title.unwrap_or_default(),
            view_count: res.statistics.view_count,
            like_count: res.statistics.like_count,
        }
    }
}

/// Entry of a playlist expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PlaylistItemResource {
    /// Convert to a [`PlaylistItem`]; `None` for entries without a video id
    /// (deleted or private videos).
    pub fn into_item(self) -> Option<PlaylistItem> {
        let video_id = self
            .content_details
            .video_id
            .filter(|id| !id.is_empty())
            .or(self.snippet.resource_id.video_id)
            .filter(|id| !id.is_empty())?;
        Some(PlaylistItem {
            video_id,
            title: self.snippet.title,
            published_at: self.snippet.published_at.as_deref().and_then(parse_timestamp),
        })
    }
}

/// Parse an RFC 3339 timestamp into UTC; `None` if malformed.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Public watch page for a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

//! YouTube Data API v3 REST client.
//!
//! Provides typed access to the endpoints behind channel statistics
//! with automatic API key injection. Every request is a single keyed
//! GET; there is no retry.

mod channels;
mod playlists;
mod request;
mod search;
mod videos;

pub mod models;

use async_trait::async_trait;

pub use models::{
    ChannelResource, ChannelSummary, ListResponse, Page, PlaylistItem, PlaylistItemResource,
    PlaylistMeta, PlaylistResource, SearchResult, VideoResource, VideoStat, parse_timestamp,
    watch_url,
};

use crate::{ApiKey, YoutubeError};

const DATA_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Upper bound for `maxResults` on list endpoints and for ids per `videos.list` call.
pub const MAX_RESULTS: u32 = 50;

/// YouTube Data API client bound to one API key.
pub struct YoutubeApiClient {
    pub(super) http: reqwest::Client,
    pub(super) api_key: ApiKey,
    pub(super) base_url: String,
}

/// The remote operations the statistics pipeline depends on.
///
/// Paged operations take the continuation token returned by the previous
/// page and report the next one in [`Page::next_page_token`].
#[async_trait]
pub trait YoutubeApi: Send + Sync {
    /// Free-text channel search. Returns candidate channel ids, best first.
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError>;

    /// Channel snapshot, or `None` when the id does not exist.
    async fn get_channel(&self, channel_id: &str) -> Result<Option<ChannelSummary>, YoutubeError>;

    async fn list_playlists(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistMeta>, YoutubeError>;

    /// Ids of videos published at or after `published_after` (RFC 3339).
    async fn search_videos(
        &self,
        channel_id: &str,
        published_after: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>, YoutubeError>;

    /// Statistics for at most [`MAX_RESULTS`] video ids.
    async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<VideoStat>, YoutubeError>;

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, YoutubeError>;
}

#[async_trait]
impl YoutubeApi for YoutubeApiClient {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        self.search_channel_ids(query, max_results).await
    }

    async fn get_channel(&self, channel_id: &str) -> Result<Option<ChannelSummary>, YoutubeError> {
        self.get_channel_summary(channel_id).await
    }

    async fn list_playlists(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistMeta>, YoutubeError> {
        self.get_playlists_page(channel_id, page_size, page_token)
            .await
    }

    async fn search_videos(
        &self,
        channel_id: &str,
        published_after: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>, YoutubeError> {
        self.search_video_ids_page(channel_id, published_after, page_size, page_token)
            .await
    }

    async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<VideoStat>, YoutubeError> {
        self.get_video_stats(video_ids).await
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, YoutubeError> {
        self.get_playlist_items_page(playlist_id, page_size, page_token)
            .await
    }
}

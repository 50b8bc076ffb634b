//! Scriptable in-memory [`YoutubeApi`] for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use youtube_client::{
    ChannelSummary, Page, PlaylistItem, PlaylistMeta, VideoStat, YoutubeApi, YoutubeError,
};

/// Serves canned pages (`page-N` tokens) and records every call.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub channels: HashMap<String, ChannelSummary>,
    pub search_hits: Vec<String>,
    pub search_fails: bool,
    pub playlist_pages: Vec<Vec<PlaylistMeta>>,
    pub video_id_pages: Vec<Vec<String>>,
    pub item_pages: Vec<Vec<PlaylistItem>>,
    pub videos: HashMap<String, VideoStat>,
    /// Zero-based page index that fails on every paged operation.
    pub fail_page: Option<usize>,
    /// Zero-based `get_videos` call that fails.
    pub fail_chunk: Option<usize>,
    pub calls: Mutex<Vec<String>>,
}

pub(crate) fn remote_error() -> YoutubeError {
    YoutubeError::ApiError {
        status: 503,
        message: "backend unavailable".into(),
    }
}

pub(crate) fn video(id: &str, views: u64) -> VideoStat {
    VideoStat {
        video_id: id.to_string(),
        title: format!("title {id}"),
        view_count: views,
        like_count: views / 10,
    }
}

pub(crate) fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i:03}")).collect()
}

impl FakeApi {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls whose name starts with `op`.
    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(op))
            .count()
    }

    fn serve<T: Clone>(
        &self,
        pages: &[Vec<T>],
        page_token: Option<&str>,
    ) -> Result<Page<T>, YoutubeError> {
        let index = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        if self.fail_page == Some(index) {
            return Err(remote_error());
        }
        let items = pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
        Ok(Page {
            items,
            next_page_token,
        })
    }
}

#[async_trait]
impl YoutubeApi for FakeApi {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        self.record(format!("search_channels:{query}:{max_results}"));
        if self.search_fails {
            return Err(remote_error());
        }
        Ok(self
            .search_hits
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }

    async fn get_channel(&self, channel_id: &str) -> Result<Option<ChannelSummary>, YoutubeError> {
        self.record(format!("get_channel:{channel_id}"));
        Ok(self.channels.get(channel_id).cloned())
    }

    async fn list_playlists(
        &self,
        channel_id: &str,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistMeta>, YoutubeError> {
        self.record(format!("list_playlists:{channel_id}"));
        self.serve(&self.playlist_pages, page_token)
    }

    async fn search_videos(
        &self,
        channel_id: &str,
        published_after: &str,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>, YoutubeError> {
        self.record(format!("search_videos:{channel_id}:{published_after}"));
        self.serve(&self.video_id_pages, page_token)
    }

    async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<VideoStat>, YoutubeError> {
        let call_index = self.count("get_videos");
        self.record(format!("get_videos:{}", video_ids.len()));
        if self.fail_chunk == Some(call_index) {
            return Err(remote_error());
        }
        Ok(video_ids
            .iter()
            .filter_map(|id| self.videos.get(id).cloned())
            .collect())
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, YoutubeError> {
        self.record(format!("list_playlist_items:{playlist_id}"));
        self.serve(&self.item_pages, page_token)
    }
}

//! Cursor-following retrieval with a partial-success policy.
//!
//! A failed page ends the walk but keeps every item already fetched;
//! pages already paid for in quota are never thrown away.

use std::future::Future;

use serde::Serialize;
use youtube_client::{Page, PlaylistItem, PlaylistMeta, YoutubeApi, YoutubeError};

/// Arguments for fetching one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_token: Option<String>,
    pub page_size: u32,
}

/// Items gathered across pages, in server order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collected<T> {
    pub items: Vec<T>,
    /// Pages that were fetched successfully.
    pub pages: usize,
    /// Error that stopped pagination early, if any.
    pub error: Option<String>,
}

impl<T> Collected<T> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Follow continuation tokens until the source stops returning one.
///
/// `limit` caps the number of items; once reached no further page is
/// requested even if the server has more.
pub async fn fetch_all<T, F, Fut>(
    page_size: u32,
    limit: Option<usize>,
    mut list_page: F,
) -> Collected<T>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, YoutubeError>>,
{
    let mut items = Vec::new();
    let mut pages = 0;
    let mut page_token: Option<String> = None;

    loop {
        if limit.is_some_and(|max| items.len() >= max) {
            break;
        }

        let request = PageRequest {
            page_token: page_token.take(),
            page_size,
        };
        match list_page(request).await {
            Ok(page) => {
                pages += 1;
                items.extend(page.items);
                if let Some(max) = limit {
                    items.truncate(max);
                }
                tracing::debug!(pages, items = items.len(), "Fetched page");
                match page.next_page_token.filter(|t| !t.is_empty()) {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    pages,
                    items = items.len(),
                    "Pagination stopped early, keeping partial results"
                );
                return Collected {
                    items,
                    pages,
                    error: Some(e.to_string()),
                };
            }
        }
    }

    Collected {
        items,
        pages,
        error: None,
    }
}

/// Every playlist of a channel.
pub async fn fetch_playlists<A>(
    api: &A,
    channel_id: &str,
    page_size: u32,
) -> Collected<PlaylistMeta>
where
    A: YoutubeApi + ?Sized,
{
    fetch_all(page_size, None, move |req: PageRequest| async move {
        api.list_playlists(channel_id, req.page_size, req.page_token.as_deref())
            .await
    })
    .await
}

/// Ids of videos the channel published at or after `published_after`.
pub async fn fetch_video_ids_since<A>(
    api: &A,
    channel_id: &str,
    published_after: &str,
    page_size: u32,
) -> Collected<String>
where
    A: YoutubeApi + ?Sized,
{
    fetch_all(page_size, None, move |req: PageRequest| async move {
        api.search_videos(
            channel_id,
            published_after,
            req.page_size,
            req.page_token.as_deref(),
        )
        .await
    })
    .await
}

/// At most `max_items` entries of one playlist.
pub async fn fetch_playlist_items<A>(
    api: &A,
    playlist_id: &str,
    page_size: u32,
    max_items: usize,
) -> Collected<PlaylistItem>
where
    A: YoutubeApi + ?Sized,
{
    fetch_all(page_size, Some(max_items), move |req: PageRequest| async move {
        api.list_playlist_items(playlist_id, req.page_size, req.page_token.as_deref())
            .await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, ids, remote_error};

    fn numbered(pages: usize, per_page: usize) -> Vec<Vec<String>> {
        (0..pages)
            .map(|p| ids(&format!("p{p}-"), per_page))
            .collect()
    }

    #[tokio::test]
    async fn follows_cursor_until_exhausted_in_server_order() {
        let api = FakeApi {
            video_id_pages: numbered(3, 50),
            ..Default::default()
        };
        let got = fetch_video_ids_since(&api, "UC1", "2024-01-01T00:00:00Z", 50).await;

        assert!(got.is_complete());
        assert_eq!(got.pages, 3);
        assert_eq!(got.items.len(), 150);
        assert_eq!(got.items[0], "p0-000");
        assert_eq!(got.items[50], "p1-000");
        assert_eq!(got.items[149], "p2-049");
        assert_eq!(api.count("search_videos"), 3);
    }

    #[tokio::test]
    async fn failure_on_second_page_keeps_first_page() {
        let api = FakeApi {
            video_id_pages: numbered(3, 50),
            fail_page: Some(1),
            ..Default::default()
        };
        let got = fetch_video_ids_since(&api, "UC1", "2024-01-01T00:00:00Z", 50).await;

        assert!(!got.is_complete());
        assert_eq!(got.pages, 1);
        assert_eq!(got.items, ids("p0-", 50));
        assert_eq!(api.count("search_videos"), 2);
    }

    #[tokio::test]
    async fn failure_on_first_page_yields_empty_partial_result() {
        let got: Collected<u32> =
            fetch_all(50, None, |_req| async { Err(remote_error()) }).await;
        assert!(got.items.is_empty());
        assert_eq!(got.pages, 0);
        assert!(got.error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn item_limit_stops_before_requesting_more_pages() {
        let items: Vec<Vec<PlaylistItem>> = (0..4)
            .map(|p| {
                ids(&format!("v{p}-"), 50)
                    .into_iter()
                    .map(|video_id| PlaylistItem {
                        video_id,
                        title: None,
                        published_at: None,
                    })
                    .collect()
            })
            .collect();
        let api = FakeApi {
            item_pages: items,
            ..Default::default()
        };

        let got = fetch_playlist_items(&api, "PL1", 50, 70).await;
        assert!(got.is_complete());
        assert_eq!(got.items.len(), 70);
        assert_eq!(got.items[69].video_id, "v1-019");
        assert_eq!(api.count("list_playlist_items"), 2);

        let none = fetch_playlist_items(&api, "PL1", 50, 0).await;
        assert!(none.items.is_empty());
        assert_eq!(api.count("list_playlist_items"), 2);
    }

    #[tokio::test]
    async fn empty_continuation_token_ends_pagination() {
        let mut served = 0;
        let got = fetch_all(10, None, |req: PageRequest| {
            served += 1;
            assert!(req.page_token.is_none());
            async move {
                Ok(Page {
                    items: vec![1, 2],
                    next_page_token: Some(String::new()),
                })
            }
        })
        .await;
        assert_eq!(got.items, vec![1, 2]);
        assert_eq!(served, 1);
    }

    #[tokio::test]
    async fn playlists_are_collected_across_pages() {
        let meta = |id: &str, count: u64| PlaylistMeta {
            playlist_id: id.into(),
            title: id.to_uppercase(),
            item_count: count,
        };
        let api = FakeApi {
            playlist_pages: vec![vec![meta("a", 3), meta("b", 9)], vec![meta("c", 1)]],
            ..Default::default()
        };
        let got = fetch_playlists(&api, "UC1", 50).await;
        let order: Vec<&str> = got.items.iter().map(|p| p.playlist_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}

//! Chunked per-video statistics lookup.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use youtube_client::{MAX_RESULTS, VideoStat, YoutubeApi};

/// Statistics keyed by video id, plus the ids whose chunk failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub stats: BTreeMap<String, VideoStat>,
    pub failed_ids: Vec<String>,
}

impl BatchStats {
    pub fn is_complete(&self) -> bool {
        self.failed_ids.is_empty()
    }
}

/// Fetch statistics for `video_ids` in chunks of `chunk_size` (max 50).
///
/// A failed chunk is skipped without retry; its ids are reported in
/// [`BatchStats::failed_ids`] and the remaining chunks still run.
/// Duplicate ids are requested once.
pub async fn get_stats<A>(api: &A, video_ids: &[String], chunk_size: usize) -> BatchStats
where
    A: YoutubeApi + ?Sized,
{
    let mut result = BatchStats::default();
    if video_ids.is_empty() {
        return result;
    }

    let mut seen = HashSet::new();
    let unique: Vec<String> = video_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();

    let chunk_size = chunk_size.clamp(1, MAX_RESULTS as usize);
    for (index, chunk) in unique.chunks(chunk_size).enumerate() {
        match api.get_videos(chunk).await {
            Ok(videos) => {
                tracing::debug!(
                    chunk = index,
                    requested = chunk.len(),
                    returned = videos.len(),
                    "Fetched video stats"
                );
                for video in videos {
                    result.stats.insert(video.video_id.clone(), video);
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    chunk = index,
                    ids = chunk.len(),
                    "Video stats chunk failed, skipping"
                );
                result.failed_ids.extend(chunk.iter().cloned());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::testing::{FakeApi, ids, video};

    fn api_with(ids: &[String]) -> FakeApi {
        FakeApi {
            videos: ids
                .iter()
                .map(|id| (id.clone(), video(id, 10)))
                .collect::<HashMap<_, _>>(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn splits_into_fixed_size_chunks() {
        let input = ids("v", 120);
        let api = api_with(&input);

        let got = get_stats(&api, &input, 50).await;

        assert_eq!(api.calls(), vec!["get_videos:50", "get_videos:50", "get_videos:20"]);
        assert_eq!(got.stats.len(), 120);
        assert!(got.is_complete());
    }

    #[tokio::test]
    async fn failed_chunk_ids_are_absent_and_later_chunks_still_run() {
        let input = ids("v", 120);
        let api = FakeApi {
            fail_chunk: Some(1),
            ..api_with(&input)
        };

        let got = get_stats(&api, &input, 50).await;

        assert_eq!(api.count("get_videos"), 3);
        let expected: Vec<String> = input[..50].iter().chain(&input[100..]).cloned().collect();
        assert_eq!(got.stats.keys().cloned().collect::<Vec<_>>(), expected);
        assert_eq!(got.failed_ids, input[50..100].to_vec());
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let api = FakeApi::default();
        let got = get_stats(&api, &[], 50).await;
        assert!(got.stats.is_empty());
        assert!(got.is_complete());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_are_requested_once_and_chunk_size_is_capped() {
        let mut input = ids("v", 60);
        input.extend(ids("v", 10));
        let api = api_with(&input);

        let got = get_stats(&api, &input, 500).await;

        assert_eq!(api.calls(), vec!["get_videos:50", "get_videos:10"]);
        assert_eq!(got.stats.len(), 60);
    }
}

use super::*;

impl YoutubeApiClient {
    /// Get title and counters for up to 50 videos.
    ///
    /// Ids past the 50th are ignored; callers chunk larger sets.
    pub async fn get_video_stats(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<VideoStat>, YoutubeError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = video_ids
            .iter()
            .take(MAX_RESULTS as usize)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let max_results = MAX_RESULTS.to_string();
        let body = self
            .keyed_get(
                "videos",
                &[
                    ("part", "snippet,statistics"),
                    ("id", ids.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;
        let resp: ListResponse<VideoResource> = serde_json::from_str(&body)?;
        Ok(resp
            .items
            .into_iter()
            .filter(|v| !v.id.is_empty())
            .map(VideoStat::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_listing_reads_string_counters() {
        let body = r#"{
          "items": [
            {
              "id": "vid1",
              "snippet": { "title": "Launch day" },
              "statistics": { "viewCount": "1503", "likeCount": "87", "commentCount": "4" }
            },
            { "id": "vid2", "snippet": { "title": "Likes hidden" }, "statistics": { "viewCount": "10" } }
          ]
        }"#;
        let parsed: ListResponse<VideoResource> = serde_json::from_str(body).unwrap();
        let stats: Vec<VideoStat> = parsed.items.into_iter().map(VideoStat::from).collect();
        assert_eq!(stats[0].view_count, 1503);
        assert_eq!(stats[0].like_count, 87);
        assert_eq!(stats[1].title, "Likes hidden");
        assert_eq!(stats[1].like_count, 0);
    }
}

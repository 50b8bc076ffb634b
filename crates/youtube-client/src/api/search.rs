use super::*;

impl YoutubeApiClient {
    /// Search channels by free text. Costs far more quota than a list call.
    pub async fn search_channel_ids(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        let max_results = max_results.clamp(1, MAX_RESULTS).to_string();
        let body = self
            .keyed_get(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;
        let resp: ListResponse<SearchResult> = serde_json::from_str(&body)?;
        let ids: Vec<String> = resp
            .items
            .into_iter()
            .filter_map(SearchResult::channel_id)
            .collect();
        tracing::debug!(query, candidates = ids.len(), "Channel search finished");
        Ok(ids)
    }

    /// Get one page of video ids a channel published at or after `published_after`.
    pub async fn search_video_ids_page(
        &self,
        channel_id: &str,
        published_after: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>, YoutubeError> {
        let page_size = page_size.clamp(1, MAX_RESULTS).to_string();
        let mut params = vec![
            ("part", "id"),
            ("type", "video"),
            ("channelId", channel_id),
            ("publishedAfter", published_after),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token.filter(|v| !v.is_empty()) {
            params.push(("pageToken", token));
        }
        let body = self.keyed_get("search", &params).await?;
        let resp: ListResponse<SearchResult> = serde_json::from_str(&body)?;
        Ok(Page {
            items: resp
                .items
                .into_iter()
                .filter_map(SearchResult::video_id)
                .collect(),
            next_page_token: resp.next_page_token,
        })
    }
}

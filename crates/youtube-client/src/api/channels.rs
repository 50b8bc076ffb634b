use super::*;

impl YoutubeApiClient {
    /// Get the snapshot of one channel by id.
    pub async fn get_channel_summary(
        &self,
        channel_id: &str,
    ) -> Result<Option<ChannelSummary>, YoutubeError> {
        let body = self
            .keyed_get(
                "channels",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", channel_id),
                    ("maxResults", "1"),
                ],
            )
            .await?;
        let resp: ListResponse<ChannelResource> = serde_json::from_str(&body)?;
        Ok(resp.items.into_iter().next().map(ChannelSummary::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_listing_deserializes() {
        let body = r#"{ "kind": "youtube#channelListResponse", "pageInfo": { "totalResults": 0 } }"#;
        let parsed: ListResponse<ChannelResource> = serde_json::from_str(body).unwrap();
        assert!(parsed.items.is_empty());
    }
}

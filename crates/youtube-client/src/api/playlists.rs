use super::*;

impl YoutubeApiClient {
    /// Get one page of a channel's playlists with their item counts.
    pub async fn get_playlists_page(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistMeta>, YoutubeError> {
        let page_size = page_size.clamp(1, MAX_RESULTS).to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("channelId", channel_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token.filter(|v| !v.is_empty()) {
            params.push(("pageToken", token));
        }
        let body = self.keyed_get("playlists", &params).await?;
        let resp: ListResponse<PlaylistResource> = serde_json::from_str(&body)?;
        Ok(Page {
            items: resp.items.into_iter().map(PlaylistMeta::from).collect(),
            next_page_token: resp.next_page_token,
        })
    }

    /// Get one page of a playlist's entries.
    pub async fn get_playlist_items_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, YoutubeError> {
        let page_size = page_size.clamp(1, MAX_RESULTS).to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token.filter(|v| !v.is_empty()) {
            params.push(("pageToken", token));
        }
        let body = self.keyed_get("playlistItems", &params).await?;
        let resp: ListResponse<PlaylistItemResource> = serde_json::from_str(&body)?;
        Ok(Page {
            items: resp
                .items
                .into_iter()
                .filter_map(PlaylistItemResource::into_item)
                .collect(),
            next_page_token: resp.next_page_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_listing_deserializes_counts_and_cursor() {
        let body = r#"{
          "nextPageToken": "CAUQAA",
          "items": [
            { "id": "PL1", "snippet": { "title": "Covers" }, "contentDetails": { "itemCount": 42 } },
            { "id": "PL2", "snippet": {}, "contentDetails": {} }
          ]
        }"#;
        let parsed: ListResponse<PlaylistResource> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.next_page_token.as_deref(), Some("CAUQAA"));
        let playlists: Vec<PlaylistMeta> =
            parsed.items.into_iter().map(PlaylistMeta::from).collect();
        assert_eq!(
            playlists[0],
            PlaylistMeta {
                playlist_id: "PL1".into(),
                title: "Covers".into(),
                item_count: 42,
            }
        );
        assert_eq!(playlists[1].title, "");
        assert_eq!(playlists[1].item_count, 0);
    }
}

//! Mapping free-form input to a canonical channel id.
//!
//! Structural checks always run before the quota-costly search fallback.

use youtube_client::YoutubeApi;

const CHANNEL_ID_PREFIX: &str = "UC";
const CHANNEL_ID_LEN: usize = 24;
const CHANNEL_SEGMENT: &str = "channel/";

/// What a trimmed input string looks like before any remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelInput {
    Empty,
    /// Already a channel id, or one extracted from a `channel/` URL.
    ChannelId(String),
    /// Anything else; needs a free-text search.
    Query(String),
}

impl ChannelInput {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if is_channel_id(trimmed) {
            return Self::ChannelId(trimmed.to_string());
        }
        if let Some((_, rest)) = trimmed.split_once(CHANNEL_SEGMENT) {
            let segment = rest.split('/').next().unwrap_or_default();
            if segment.is_empty() {
                return Self::Empty;
            }
            return Self::ChannelId(segment.to_string());
        }
        Self::Query(trimmed.to_string())
    }
}

/// `UC` followed by 22 more characters.
pub fn is_channel_id(s: &str) -> bool {
    s.starts_with(CHANNEL_ID_PREFIX) && s.chars().count() == CHANNEL_ID_LEN
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    NotFound,
    /// The search fallback itself failed; the input may still be valid.
    Failed(String),
}

impl Resolution {
    pub fn channel_id(self) -> Option<String> {
        match self {
            Self::Found(id) => Some(id),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Search fallback: first of at most `candidates` channel hits.
pub async fn search_channel<A>(api: &A, query: &str, candidates: u32) -> Resolution
where
    A: YoutubeApi + ?Sized,
{
    match api.search_channels(query, candidates).await {
        Ok(ids) => match ids.into_iter().next() {
            Some(id) => Resolution::Found(id),
            None => {
                tracing::info!(query, "No channel matched search");
                Resolution::NotFound
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, query, "Channel search failed");
            Resolution::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    const ID: &str = "UCabcdefghijklmnopqrstuv";

    #[test]
    fn canonical_ids_pass_through_verbatim() {
        assert_eq!(ChannelInput::parse(ID), ChannelInput::ChannelId(ID.into()));
        assert_eq!(
            ChannelInput::parse(&format!("  {ID}\n")),
            ChannelInput::ChannelId(ID.into())
        );
    }

    #[test]
    fn wrong_length_or_prefix_is_not_an_id() {
        assert!(!is_channel_id("UCshort"));
        assert!(!is_channel_id("XXabcdefghijklmnopqrstuv"));
        assert_eq!(
            ChannelInput::parse("UCabcdefghijklmnopqrstuvw"),
            ChannelInput::Query("UCabcdefghijklmnopqrstuvw".into())
        );
    }

    #[test]
    fn channel_segment_is_extracted_up_to_next_slash() {
        for input in [
            "https://www.youtube.com/channel/XYZ",
            "https://www.youtube.com/channel/XYZ/videos",
            "youtube.com/channel/XYZ/",
            "m.youtube.com/c/foo/channel/XYZ/about",
        ] {
            assert_eq!(
                ChannelInput::parse(input),
                ChannelInput::ChannelId("XYZ".into()),
                "{input}"
            );
        }
        assert_eq!(
            ChannelInput::parse("https://youtube.com/channel/"),
            ChannelInput::Empty
        );
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(ChannelInput::parse(""), ChannelInput::Empty);
        assert_eq!(ChannelInput::parse(" \t "), ChannelInput::Empty);
    }

    #[test]
    fn other_text_becomes_a_query() {
        assert_eq!(
            ChannelInput::parse("  @lofigirl "),
            ChannelInput::Query("@lofigirl".into())
        );
    }

    #[tokio::test]
    async fn search_returns_first_candidate() {
        let api = FakeApi {
            search_hits: vec!["UC-first".into(), "UC-second".into()],
            ..Default::default()
        };
        let found = search_channel(&api, "lofi", 3).await;
        assert_eq!(found, Resolution::Found("UC-first".into()));
        assert_eq!(api.calls(), vec!["search_channels:lofi:3"]);
    }

    #[tokio::test]
    async fn search_errors_and_empty_results_resolve_to_none() {
        let empty = FakeApi::default();
        assert_eq!(
            search_channel(&empty, "nobody", 3).await,
            Resolution::NotFound
        );

        let failing = FakeApi {
            search_fails: true,
            ..Default::default()
        };
        let failed = search_channel(&failing, "lofi", 3).await;
        assert!(failed.is_failed());
        assert_eq!(failed.channel_id(), None);
    }
}

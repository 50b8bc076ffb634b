use serde::Deserialize;
use url::Url;

use super::*;

impl YoutubeApiClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, DATA_API_BASE)
    }

    /// Point the client at a different API root (e.g. a local mock).
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Build the URL for `resource` with the given query pairs and the API key.
    pub(super) fn endpoint_url(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, YoutubeError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{resource}"))?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            query.append_pair("key", self.api_key.expose());
        }
        Ok(url)
    }

    /// Execute a keyed GET request and return the body on success.
    pub(super) async fn keyed_get(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<String, YoutubeError> {
        let url = self.endpoint_url(resource, params)?;
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            // The URL carries the key, so only the resource name is logged.
            tracing::warn!(
                resource,
                status = status.as_u16(),
                %message,
                "YouTube API request failed"
            );
            return Err(YoutubeError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Pull `error.message` out of a Google API error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.trim().to_string(),
    }
}

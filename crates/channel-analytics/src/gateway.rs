//! Process-wide registry of API clients, one per distinct key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use youtube_client::{ApiKey, YoutubeApiClient};

use crate::AnalyticsError;

/// Validate a raw credential; absent or blank keys are a configuration error.
pub fn validate_credential(raw: Option<&str>) -> Result<ApiKey, AnalyticsError> {
    let raw =
        raw.ok_or_else(|| AnalyticsError::Configuration("YouTube API key is not set".into()))?;
    ApiKey::new(raw).map_err(|_| AnalyticsError::Configuration("YouTube API key is empty".into()))
}

type ClientFactory<C> = Box<dyn Fn(&ApiKey) -> C + Send + Sync>;

/// Hands out a shared client per API key, building each at most once.
pub struct ClientRegistry<C = YoutubeApiClient> {
    clients: Mutex<HashMap<ApiKey, Arc<C>>>,
    factory: ClientFactory<C>,
}

impl ClientRegistry<YoutubeApiClient> {
    pub fn new() -> Self {
        Self::with_factory(|key| YoutubeApiClient::new(key.clone()))
    }
}

impl Default for ClientRegistry<YoutubeApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClientRegistry<C> {
    pub fn with_factory(factory: impl Fn(&ApiKey) -> C + Send + Sync + 'static) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            factory: Box::new(factory),
        }
    }

    /// Shared client for `credential`, constructing it on first use.
    pub fn get_client(&self, credential: Option<&str>) -> Result<Arc<C>, AnalyticsError> {
        let key = validate_credential(credential)?;
        Ok(self.client_for(&key))
    }

    pub fn client_for(&self, key: &ApiKey) -> Arc<C> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(key) {
            return Arc::clone(client);
        }
        tracing::debug!(pooled = clients.len(), "Building YouTube API client");
        let client = Arc::new((self.factory)(key));
        clients.insert(key.clone(), Arc::clone(&client));
        client
    }

    /// Number of distinct clients built so far.
    pub fn len(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_registry() -> (ClientRegistry<String>, Arc<AtomicUsize>) {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let registry = ClientRegistry::with_factory(move |key: &ApiKey| {
            counter.fetch_add(1, Ordering::SeqCst);
            format!("client-for-{}", key.expose())
        });
        (registry, built)
    }

    #[test]
    fn missing_or_blank_credential_is_a_configuration_error() {
        let (registry, built) = counting_registry();
        assert!(matches!(
            registry.get_client(None),
            Err(AnalyticsError::Configuration(_))
        ));
        assert!(matches!(
            registry.get_client(Some("  ")),
            Err(AnalyticsError::Configuration(_))
        ));
        assert_eq!(built.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn same_credential_reuses_one_client() {
        let (registry, built) = counting_registry();
        let first = registry.get_client(Some("key-1")).unwrap();
        let second = registry.get_client(Some("key-1")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(built.load(Ordering::SeqCst), 1);

        let other = registry.get_client(Some("key-2")).unwrap();
        assert_eq!(other.as_str(), "client-for-key-2");
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(registry.len(), 2);
    }
}

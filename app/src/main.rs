//! Command-line front end for channel statistics.
//!
//! Prints one aggregation pass (or one playlist expansion) as JSON.
//!
//! ```text
//! channel-stats <channel id | channel URL | name>
//! channel-stats --playlist <playlist id> [max items]
//! ```

mod config;

use std::sync::Arc;

use anyhow::{Context, bail};
use channel_analytics::{ChannelAnalytics, ClientRegistry, TtlCache};
use tracing_subscriber::EnvFilter;

use config::{API_KEY_VAR, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    config::load_dotenv();
    let config = AppConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let registry = ClientRegistry::new();
    let analytics = ChannelAnalytics::connect(
        &registry,
        config.api_key.as_deref(),
        Arc::new(TtlCache::new()),
        config.analytics,
    )
    .with_context(|| format!("set {API_KEY_VAR} in the environment or .env"))?;

    let output = match args.first().map(String::as_str) {
        Some("--playlist") => {
            let Some(playlist_id) = args.get(1) else {
                bail!("usage: channel-stats --playlist <playlist id> [max items]");
            };
            let max_items = match args.get(2) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("invalid max items: {raw}"))?,
                None => analytics.config().playlist_item_limit,
            };
            let expanded = analytics.expand_playlist(playlist_id, max_items).await;
            if let Some(error) = &expanded.error {
                tracing::warn!(
                    %error,
                    items = expanded.items.len(),
                    "Playlist expansion incomplete"
                );
            }
            serde_json::to_string_pretty(&expanded)?
        }
        _ => {
            let input = args.join(" ");
            if input.trim().is_empty() {
                bail!("usage: channel-stats <channel id | channel URL | name>");
            }
            let report = analytics
                .report(&input)
                .await
                .with_context(|| format!("could not find a channel for {input:?}"))?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}

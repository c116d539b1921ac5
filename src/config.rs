use std::path::PathBuf;
use std::time::Duration;

/// Explicit configuration for the lookup engine.
///
/// Everything the clients need is passed in here at construction time;
/// nothing is read from ambient globals. The API key is forwarded to Steam
/// as-is on the endpoints that want one and is never validated locally.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Steam Web API key, forwarded unvalidated. Empty means unauthenticated.
    pub api_key: String,

    /// User-Agent header for both the HTTP client and the browser session
    pub user_agent: String,

    /// Storefront base, normally `https://store.steampowered.com`
    pub store_base_url: String,

    /// Web API base, normally `https://api.steampowered.com`
    pub api_base_url: String,

    /// Community base, normally `https://steamcommunity.com`
    pub community_base_url: String,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// How long the rendering session waits for client-side script to
    /// populate search results before the markup is inspected
    pub settle_window: Duration,

    /// Remote debugging port handed to the browser process
    pub remote_debug_port: u16,

    /// Chromium binary override; `None` lets the backend discover one
    pub chrome_executable: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            user_agent: format!("steamscout/{}", env!("CARGO_PKG_VERSION")),
            store_base_url: "https://store.steampowered.com".to_string(),
            api_base_url: "https://api.steampowered.com".to_string(),
            community_base_url: "https://steamcommunity.com".to_string(),
            request_timeout: Duration::from_secs(10),
            settle_window: Duration::from_secs(5),
            remote_debug_port: 9222,
            chrome_executable: None,
        }
    }
}

impl LookupConfig {
    /// Config with an API key and production endpoints
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Self::default() }
    }
}

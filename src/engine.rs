use tokio_util::sync::CancellationToken;

use crate::catalog::CatalogClient;
use crate::config::LookupConfig;
use crate::core::user_profile::profile_url_tail;
use crate::core::{
    classify_profile_url, AchievementStat, GameSummary, NewsItem, OwnedGame, ProfileUrlKind,
    UserProfile,
};
use crate::error::{LookupError, LookupResult};
use crate::resolver::ProfileResolver;

/// The unified Steam lookup capability.
///
/// One facade over the two collaborating components: the catalog client for
/// the JSON endpoints and the profile resolver for the browser-driven
/// display-name search. Stateless between calls; safe to share across
/// concurrent callers.
pub struct SteamLookup {
    catalog: CatalogClient,
    resolver: ProfileResolver,
    api_key: String,
}

impl SteamLookup {
    /// Build both components from one configuration
    pub fn new(config: LookupConfig) -> Self {
        let catalog = CatalogClient::new(&config);
        let resolver = ProfileResolver::new(&config);
        Self { catalog, resolver, api_key: config.api_key }
    }

    /// Compose from pre-built parts (custom rendering backends, tests)
    pub fn with_parts(
        catalog: CatalogClient,
        resolver: ProfileResolver,
        api_key: impl Into<String>,
    ) -> Self {
        Self { catalog, resolver, api_key: api_key.into() }
    }

    /// Search the storefront catalog for a game title
    pub async fn search_games(&self, query: &str) -> LookupResult<Vec<GameSummary>> {
        self.catalog.search_games(query).await
    }

    /// Latest news entries for a game title
    pub async fn fetch_news(&self, game_title: &str, count: usize) -> LookupResult<Vec<NewsItem>> {
        self.catalog.fetch_news(game_title, count).await
    }

    /// Global achievement unlock percentages for a game title
    pub async fn fetch_achievements(&self, game_title: &str) -> LookupResult<Vec<AchievementStat>> {
        self.catalog.fetch_achievements(game_title).await
    }

    /// Current player count for a game title
    pub async fn fetch_player_count(&self, game_title: &str) -> LookupResult<u64> {
        self.catalog.fetch_player_count(game_title).await
    }

    /// Owned games of a steamid64, using the configured API key
    pub async fn fetch_owned_games(&self, steam_id: &str) -> LookupResult<Vec<OwnedGame>> {
        self.catalog.fetch_owned_games(steam_id, &self.api_key).await
    }

    /// Resolve a vanity alias to a steamid64, using the configured API key
    pub async fn resolve_vanity_url(&self, vanity_name: &str) -> LookupResult<String> {
        self.catalog.resolve_vanity_url(vanity_name, &self.api_key).await
    }

    /// Search community profiles by display name
    pub async fn search_display_names(&self, display_name: &str) -> LookupResult<Vec<UserProfile>> {
        self.resolver.search_display_names(display_name).await
    }

    /// Cancellable display-name search; teardown runs even when aborted
    pub async fn search_display_names_with_cancel(
        &self,
        display_name: &str,
        cancel: &CancellationToken,
    ) -> LookupResult<Vec<UserProfile>> {
        self.resolver
            .search_display_names_with_cancel(display_name, cancel)
            .await
    }

    /// Canonical steamid64 behind a profile URL: extracted directly for
    /// `/profiles/` URLs, resolved through the vanity endpoint for `/id/`
    /// URLs.
    pub async fn steam_id_from_profile_url(&self, profile_url: &str) -> LookupResult<String> {
        match classify_profile_url(profile_url) {
            ProfileUrlKind::SteamId64 => Ok(profile_url_tail(profile_url).to_string()),
            ProfileUrlKind::Vanity => {
                self.resolve_vanity_url(profile_url_tail(profile_url)).await
            }
            ProfileUrlKind::Unrecognized => Err(LookupError::Parse(format!(
                "not a recognized profile url: {}",
                profile_url
            ))),
        }
    }
}

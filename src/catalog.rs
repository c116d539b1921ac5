use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::LookupConfig;
use crate::core::{AchievementStat, GameSummary, NewsItem, OwnedGame, PlatformSet, PriceTag};
use crate::error::{LookupError, LookupResult};

/// News entries fetched when the caller does not ask for a count
pub const DEFAULT_NEWS_COUNT: usize = 5;

/// Client for the storefront and web-API JSON endpoints.
///
/// Pure request -> parse -> normalize; holds no state beyond the HTTP
/// client and the configured base URLs. Title-based operations resolve the
/// title through storefront search first and accept the first match.
pub struct CatalogClient {
    http: Client,
    store_base: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct StoreSearchResponse {
    #[serde(default)]
    items: Vec<StoreSearchItem>,
}

#[derive(Debug, Deserialize)]
struct StoreSearchItem {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tiny_image: String,
    #[serde(default)]
    price: Option<StorePrice>,
    #[serde(default, deserialize_with = "deserialize_metascore")]
    metascore: Option<u8>,
    #[serde(default)]
    platforms: StorePlatforms,
    #[serde(default)]
    controller_support: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StorePrice {
    #[serde(default)]
    currency: String,
    #[serde(rename = "final", default)]
    final_price: u64,
}

#[derive(Debug, Default, Deserialize)]
struct StorePlatforms {
    #[serde(default)]
    windows: bool,
    #[serde(default)]
    mac: bool,
    #[serde(default)]
    linux: bool,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    appnews: Option<AppNews>,
}

#[derive(Debug, Deserialize)]
struct AppNews {
    #[serde(default)]
    newsitems: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct AchievementsResponse {
    #[serde(default)]
    achievementpercentages: Option<AchievementPercentages>,
}

#[derive(Debug, Deserialize)]
struct AchievementPercentages {
    #[serde(default)]
    achievements: Vec<AchievementStat>,
}

#[derive(Debug, Deserialize)]
struct PlayerCountResponse {
    #[serde(default)]
    response: PlayerCountBody,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerCountBody {
    #[serde(default)]
    player_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    response: OwnedGamesBody,
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGamesBody {
    #[serde(default)]
    games: Option<Vec<OwnedGameEntry>>,
}

#[derive(Debug, Deserialize)]
struct OwnedGameEntry {
    appid: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    playtime_forever: u64,
    #[serde(default)]
    playtime_2weeks: u64,
}

#[derive(Debug, Deserialize)]
struct VanityResponse {
    #[serde(default)]
    response: VanityBody,
}

#[derive(Debug, Default, Deserialize)]
struct VanityBody {
    #[serde(default)]
    success: i64,
    #[serde(default)]
    steamid: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// The storefront sends the metascore as a bare number, a numeric string,
/// or an empty string; all three must land in the same Option.
fn deserialize_metascore<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScoreValue {
        Int(u8),
        String(String),
        Null,
    }

    match ScoreValue::deserialize(deserializer)? {
        ScoreValue::Int(score) => Ok(Some(score)),
        ScoreValue::String(s) => Ok(s.trim().parse::<u8>().ok()),
        ScoreValue::Null => Ok(None),
    }
}

impl CatalogClient {
    /// Create a client from the shared configuration
    pub fn new(config: &LookupConfig) -> Self {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            store_base: config.store_base_url.clone(),
            api_base: config.api_base_url.clone(),
        }
    }

    /// One GET round trip with the shared error conversion: transport
    /// faults and non-2xx become `Transport`, undecodable bodies `Parse`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> LookupResult<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP {}", status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Parse(format!("invalid JSON: {}", e)))
    }

    /// Search the storefront catalog, english/US locale.
    ///
    /// Never returns an empty list: an empty upstream result set is the
    /// not-found variant keyed on the query.
    pub async fn search_games(&self, query: &str) -> LookupResult<Vec<GameSummary>> {
        let url = format!(
            "{}/api/storesearch/?term={}&l=english&cc=us",
            self.store_base,
            urlencoding::encode(query)
        );

        let body: StoreSearchResponse = self.get_json(&url).await?;
        tracing::debug!("storefront search for {:?} returned {} items", query, body.items.len());

        if body.items.is_empty() {
            return Err(LookupError::not_found(query));
        }

        Ok(body.items.into_iter().map(summarize).collect())
    }

    /// First storefront match for a title. Ambiguous titles are not
    /// disambiguated; resolution failure is not-found for the title itself.
    async fn resolve_app_id(&self, game_title: &str) -> LookupResult<u64> {
        let games = self.search_games(game_title).await?;
        games
            .first()
            .map(|g| g.app_id)
            .ok_or_else(|| LookupError::not_found(game_title))
    }

    /// Latest news entries for a title
    pub async fn fetch_news(&self, game_title: &str, count: usize) -> LookupResult<Vec<NewsItem>> {
        let app_id = self.resolve_app_id(game_title).await?;
        let url = format!(
            "{}/ISteamNews/GetNewsForApp/v2/?appid={}&count={}",
            self.api_base, app_id, count
        );

        let body: NewsResponse = self.get_json(&url).await?;
        let items = body.appnews.map(|n| n.newsitems).unwrap_or_default();

        if items.is_empty() {
            return Err(LookupError::not_found(game_title));
        }

        Ok(items)
    }

    /// Global achievement unlock percentages for a title
    pub async fn fetch_achievements(&self, game_title: &str) -> LookupResult<Vec<AchievementStat>> {
        let app_id = self.resolve_app_id(game_title).await?;
        let url = format!(
            "{}/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/?gameid={}",
            self.api_base, app_id
        );

        let body: AchievementsResponse = self.get_json(&url).await?;
        let stats = body.achievementpercentages.map(|a| a.achievements).unwrap_or_default();

        if stats.is_empty() {
            return Err(LookupError::not_found(game_title));
        }

        Ok(stats)
    }

    /// Current player count for a title. A missing or negative count is a
    /// parse failure, never a silent zero.
    pub async fn fetch_player_count(&self, game_title: &str) -> LookupResult<u64> {
        let app_id = self.resolve_app_id(game_title).await?;
        let url = format!(
            "{}/ISteamUserStats/GetNumberOfCurrentPlayers/v1/?appid={}",
            self.api_base, app_id
        );

        let body: PlayerCountResponse = self.get_json(&url).await?;
        match body.response.player_count {
            Some(count) if count >= 0 => Ok(count as u64),
            Some(count) => Err(LookupError::Parse(format!(
                "negative player count {} for '{}'",
                count, game_title
            ))),
            None => Err(LookupError::Parse(format!(
                "player count missing from response for '{}'",
                game_title
            ))),
        }
    }

    /// Library of a steamid64, names and playtimes included. The key is
    /// forwarded to Steam as-is.
    pub async fn fetch_owned_games(
        &self,
        steam_id: &str,
        api_key: &str,
    ) -> LookupResult<Vec<OwnedGame>> {
        let url = format!(
            "{}/IPlayerService/GetOwnedGames/v1/?key={}&steamid={}\
             &include_appinfo=1&include_played_free_games=1&include_free_sub=1\
             &include_playtime_forever=1",
            self.api_base,
            urlencoding::encode(api_key),
            urlencoding::encode(steam_id)
        );

        let body: OwnedGamesResponse = self.get_json(&url).await?;
        let games = body.response.games.unwrap_or_default();

        if games.is_empty() {
            return Err(LookupError::not_found(steam_id));
        }

        Ok(games
            .into_iter()
            .map(|g| OwnedGame {
                app_id: g.appid,
                name: g.name.unwrap_or_else(|| "Unknown Game Name".to_string()),
                playtime_forever: g.playtime_forever,
                playtime_2weeks: g.playtime_2weeks,
            })
            .collect())
    }

    /// Resolve a vanity alias to a steamid64.
    ///
    /// The in-body success flag gates the outcome, not the transport
    /// status; a refusal carries the upstream message when one is present.
    pub async fn resolve_vanity_url(
        &self,
        vanity_name: &str,
        api_key: &str,
    ) -> LookupResult<String> {
        let url = format!(
            "{}/ISteamUser/ResolveVanityURL/v1/?key={}&vanityurl={}",
            self.api_base,
            urlencoding::encode(api_key),
            urlencoding::encode(vanity_name)
        );

        let body: VanityResponse = self.get_json(&url).await?;

        if body.response.success != 1 {
            let reason = body
                .response
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(LookupError::Parse(format!(
                "could not resolve vanity url '{}': {}",
                vanity_name, reason
            )));
        }

        body.response.steamid.ok_or_else(|| {
            LookupError::Parse(format!(
                "vanity response for '{}' reported success without a steamid",
                vanity_name
            ))
        })
    }
}

/// Normalize one search item: absent upstream fields become explicit
/// defaults so nothing downstream branches on presence.
fn summarize(item: StoreSearchItem) -> GameSummary {
    let price = match item.price {
        Some(p) => PriceTag::Priced { cents: p.final_price, currency: p.currency },
        None => PriceTag::Unavailable,
    };

    GameSummary {
        app_id: item.id,
        name: item.name,
        thumbnail: item.tiny_image,
        price,
        metascore: item.metascore,
        platforms: PlatformSet {
            windows: item.platforms.windows,
            mac: item.platforms.mac,
            linux: item.platforms.linux,
        },
        controller_support: item.controller_support.as_deref() == Some("full"),
    }
}

//! # steamscout
//!
//! Steam catalog and profile lookup engine with:
//! - Storefront search with fully normalized game summaries
//! - News, global achievement percentages and player counts per title
//! - Display-name profile search via an isolated headless rendering session
//! - Vanity URL / steamid64 resolution and owned-games lookup
//! - Async/await architecture with one uniform result model
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use steamscout::{LookupConfig, SteamLookup};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let lookup = SteamLookup::new(LookupConfig::default());
//!
//!     let games = lookup.search_games("portal").await?;
//!     println!("top hit: {} ({})", games[0].name, games[0].price);
//!
//!     let profiles = lookup.search_display_names("gaben").await?;
//!     println!("{} profiles found", profiles.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod resolver;

// Re-export primary types
pub use catalog::CatalogClient;
pub use config::LookupConfig;
pub use crate::core::{
    classify_profile_url, AchievementStat, GameSummary, NewsItem, OwnedGame, PlatformSet,
    PriceTag, ProfileUrlKind, UserProfile,
};
pub use engine::SteamLookup;
pub use error::{LookupError, LookupResult};
pub use resolver::{ChromeBackend, ProfileResolver, RenderBackend, RenderSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

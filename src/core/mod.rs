pub mod game_summary;
pub mod records;
pub mod user_profile;

pub use game_summary::{GameSummary, PlatformSet, PriceTag};
pub use records::{AchievementStat, NewsItem, OwnedGame};
pub use user_profile::{classify_profile_url, ProfileUrlKind, UserProfile};

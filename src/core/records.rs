use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One app-news entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,

    /// Body excerpt as the feed delivers it (may contain bbcode/html)
    #[serde(default)]
    pub contents: String,

    #[serde(default)]
    pub url: String,

    /// Publish time, epoch seconds
    #[serde(default)]
    pub date: i64,
}

impl NewsItem {
    /// Publish time as a calendar date for display
    pub fn published_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.date, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Global unlock percentage for one achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStat {
    #[serde(default)]
    pub name: String,

    /// 0-100 share of players that unlocked it
    #[serde(default)]
    pub percent: f64,
}

/// One library entry from the owned-games endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub app_id: u64,

    /// "Unknown Game Name" when the endpoint omits appinfo
    pub name: String,

    /// Lifetime playtime in minutes
    #[serde(default)]
    pub playtime_forever: u64,

    /// Last-two-weeks playtime in minutes
    #[serde(default)]
    pub playtime_2weeks: u64,
}

impl OwnedGame {
    /// Lifetime playtime in hours for display
    pub fn playtime_hours(&self) -> f64 {
        self.playtime_forever as f64 / 60.0
    }
}

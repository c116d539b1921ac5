use std::fmt;

use serde::{Deserialize, Serialize};

/// Price of a catalog entry in minor currency units.
///
/// The storefront omits the price block entirely for free or delisted
/// titles, so absence is an explicit marker here rather than a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PriceTag {
    /// Final price in minor currency units (cents) plus ISO currency code
    Priced { cents: u64, currency: String },
    /// No price listed upstream
    Unavailable,
}

impl fmt::Display for PriceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTag::Priced { cents, currency } => {
                write!(f, "{:.2} {}", *cents as f64 / 100.0, currency)
            }
            PriceTag::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Platform availability set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSet {
    #[serde(default)]
    pub windows: bool,
    #[serde(default)]
    pub mac: bool,
    #[serde(default)]
    pub linux: bool,
}

impl PlatformSet {
    /// Human-readable labels, in the storefront's display order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.windows {
            labels.push("Windows");
        }
        if self.mac {
            labels.push("Mac");
        }
        if self.linux {
            labels.push("Linux");
        }
        labels
    }
}

/// One storefront search hit, fully normalized.
///
/// Every field is resolved to an explicit default when the upstream item
/// omits it, so rendering code never branches on field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Numeric catalog identifier
    pub app_id: u64,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Storefront thumbnail URL, empty when the item carries none
    #[serde(default)]
    pub thumbnail: String,

    /// Listed price, or the explicit unavailable marker
    pub price: PriceTag,

    /// Metacritic score 0-100 when the storefront reports one
    #[serde(default)]
    pub metascore: Option<u8>,

    /// Platform availability
    #[serde(default)]
    pub platforms: PlatformSet,

    /// Whether the storefront flags full controller support
    #[serde(default)]
    pub controller_support: bool,
}

impl GameSummary {
    /// Store page URL for this entry
    pub fn store_url(&self) -> String {
        format!("https://store.steampowered.com/app/{}", self.app_id)
    }
}

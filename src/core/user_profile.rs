use serde::{Deserialize, Serialize};

/// One community search hit, scraped from rendered markup.
///
/// The canonical numeric identity is not resolved at this stage; vanity
/// URLs go through the separate resolution endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub profile_url: String,
}

/// Shape of a community profile URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileUrlKind {
    /// `/id/<alias>` — human-chosen alias, needs vanity resolution
    Vanity,
    /// `/profiles/<17 digits>` — already a steamid64
    SteamId64,
    /// Neither canonical shape
    Unrecognized,
}

/// Classify a profile URL by its two canonical community shapes.
pub fn classify_profile_url(url: &str) -> ProfileUrlKind {
    if let Some(alias) = url.strip_prefix("https://steamcommunity.com/id/") {
        let alias = alias.trim_end_matches('/');
        if !alias.is_empty()
            && !alias.contains('/')
            && alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return ProfileUrlKind::Vanity;
        }
    }
    if let Some(id) = url.strip_prefix("https://steamcommunity.com/profiles/") {
        let id = id.trim_end_matches('/');
        if id.len() == 17 && id.chars().all(|c| c.is_ascii_digit()) {
            return ProfileUrlKind::SteamId64;
        }
    }
    ProfileUrlKind::Unrecognized
}

/// Last path segment of a profile URL: the alias for vanity URLs, the
/// numeric id for steamid64 URLs.
pub(crate) fn profile_url_tail(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanity_url() {
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/id/gabelogannewell"),
            ProfileUrlKind::Vanity
        );
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/id/some-alias_42/"),
            ProfileUrlKind::Vanity
        );
    }

    #[test]
    fn test_steamid64_url() {
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/profiles/76561197960287930"),
            ProfileUrlKind::SteamId64
        );
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/profiles/76561197960287930/"),
            ProfileUrlKind::SteamId64
        );
    }

    #[test]
    fn test_unrecognized_urls() {
        // wrong host, wrong digit count, nested path, empty alias
        assert_eq!(
            classify_profile_url("https://example.com/id/whoever"),
            ProfileUrlKind::Unrecognized
        );
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/profiles/1234"),
            ProfileUrlKind::Unrecognized
        );
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/id/a/b"),
            ProfileUrlKind::Unrecognized
        );
        assert_eq!(
            classify_profile_url("https://steamcommunity.com/id/"),
            ProfileUrlKind::Unrecognized
        );
    }

    #[test]
    fn test_profile_url_tail() {
        assert_eq!(profile_url_tail("https://steamcommunity.com/id/alias/"), "alias");
        assert_eq!(
            profile_url_tail("https://steamcommunity.com/profiles/76561197960287930"),
            "76561197960287930"
        );
    }
}

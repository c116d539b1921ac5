use scraper::{Html, Selector};

use crate::core::UserProfile;

// The community search page marks each hit with these classes. This is the
// most fragile interface in the system: the page is versioned by nobody and
// the selectors track whatever it currently ships.
const ROW_SELECTOR: &str = "div.search_row";
const ANCHOR_SELECTOR: &str = "a.searchPersonaName";

/// Extract profile rows from rendered search markup, in document order.
///
/// A row contributes a profile only when its persona anchor has both
/// non-empty text and a non-empty link target; partial rows are skipped,
/// never errored.
pub(crate) fn profile_rows(markup: &str) -> Vec<UserProfile> {
    let document = Html::parse_document(markup);
    let rows = Selector::parse(ROW_SELECTOR).expect("row selector is valid");
    let anchors = Selector::parse(ANCHOR_SELECTOR).expect("anchor selector is valid");

    let mut profiles = Vec::new();
    for row in document.select(&rows) {
        let anchor = match row.select(&anchors).next() {
            Some(anchor) => anchor,
            None => continue,
        };

        let display_name = anchor.text().collect::<String>().trim().to_string();
        let profile_url = anchor.value().attr("href").unwrap_or("").trim().to_string();

        if display_name.is_empty() || profile_url.is_empty() {
            tracing::warn!("skipping partial search row (missing name or link)");
            continue;
        }

        profiles.push(UserProfile { display_name, profile_url });
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, href: Option<&str>) -> String {
        let anchor = match href {
            Some(href) => format!(r#"<a class="searchPersonaName" href="{}">{}</a>"#, href, name),
            None => format!(r#"<a class="searchPersonaName">{}</a>"#, name),
        };
        format!(r#"<div class="search_row">{}</div>"#, anchor)
    }

    #[test]
    fn test_extracts_rows_in_document_order() {
        let markup = format!(
            "<html><body>{}{}</body></html>",
            row("Alyx", Some("https://steamcommunity.com/id/alyx")),
            row("Barney", Some("https://steamcommunity.com/profiles/76561197960287930")),
        );

        let profiles = profile_rows(&markup);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].display_name, "Alyx");
        assert_eq!(profiles[1].display_name, "Barney");
        assert_eq!(profiles[1].profile_url, "https://steamcommunity.com/profiles/76561197960287930");
    }

    #[test]
    fn test_partial_rows_skipped_without_reducing_valid_count() {
        let markup = format!(
            "<html><body>{}{}{}{}</body></html>",
            row("", Some("https://steamcommunity.com/id/nameless")),
            row("NoLink", None),
            r#"<div class="search_row"><span>no anchor at all</span></div>"#,
            row("Kept", Some("https://steamcommunity.com/id/kept")),
        );

        let profiles = profile_rows(&markup);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].display_name, "Kept");
    }

    #[test]
    fn test_whitespace_trimmed_from_name_and_link() {
        let markup = row("  Spaced Out  ", Some("  https://steamcommunity.com/id/spaced  "));

        let profiles = profile_rows(&markup);
        assert_eq!(profiles[0].display_name, "Spaced Out");
        assert_eq!(profiles[0].profile_url, "https://steamcommunity.com/id/spaced");
    }

    #[test]
    fn test_no_rows_yields_empty() {
        assert!(profile_rows("<html><body><p>nothing here</p></body></html>").is_empty());
    }
}

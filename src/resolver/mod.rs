pub mod chrome;
mod extract;
pub mod session;

pub use chrome::ChromeBackend;
pub use session::{RenderBackend, RenderSession};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::LookupConfig;
use crate::core::UserProfile;
use crate::error::{LookupError, LookupResult};

/// Resolves free-text display names to candidate profiles by driving a
/// scriptable browser against the community's client-rendered search page.
///
/// There is no JSON endpoint for this: the page renders its results with
/// script after navigation, so each lookup opens an isolated rendering
/// session, waits out the settle window and scrapes the resulting markup.
pub struct ProfileResolver {
    backend: Arc<dyn RenderBackend>,
    community_base: String,
}

impl ProfileResolver {
    /// Resolver over a per-call headless chromium backend
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            backend: Arc::new(ChromeBackend::new(config)),
            community_base: config.community_base_url.clone(),
        }
    }

    /// Resolver over a custom rendering backend (tests, alternative drivers)
    pub fn with_backend(backend: Arc<dyn RenderBackend>, community_base: impl Into<String>) -> Self {
        Self { backend, community_base: community_base.into() }
    }

    /// Search community profiles matching a display name.
    ///
    /// Results keep the page's own relevance order. Zero extracted rows is
    /// the not-found variant carrying the original query.
    pub async fn search_display_names(&self, display_name: &str) -> LookupResult<Vec<UserProfile>> {
        self.search_display_names_with_cancel(display_name, &CancellationToken::new())
            .await
    }

    /// Like [`Self::search_display_names`], aborting the in-flight drive
    /// (including the settle wait) when the token fires. Teardown still runs.
    pub async fn search_display_names_with_cancel(
        &self,
        display_name: &str,
        cancel: &CancellationToken,
    ) -> LookupResult<Vec<UserProfile>> {
        // The query travels as a URL fragment: it is read by the page's own
        // script, not by the server.
        let url = format!(
            "{}/search/users/#text={}",
            self.community_base,
            urlencoding::encode(display_name)
        );

        let mut session = self.backend.open().await?;

        let driven = tokio::select! {
            outcome = drive(session.as_mut(), &url) => outcome,
            _ = cancel.cancelled() => Err(LookupError::Cancelled),
        };

        // The session closes exactly once on every path out of this call:
        // success, zero rows, drive failure or cancellation.
        if let Err(e) = session.close().await {
            tracing::warn!("rendering session close failed: {}", e);
        }

        let markup = driven?;
        let profiles = extract::profile_rows(&markup);
        tracing::debug!(
            "display-name search for {:?} extracted {} rows",
            display_name,
            profiles.len()
        );

        if profiles.is_empty() {
            return Err(LookupError::not_found(display_name));
        }

        Ok(profiles)
    }
}

/// Navigate, wait out the settle window, capture the rendered markup
async fn drive(session: &mut dyn RenderSession, url: &str) -> LookupResult<String> {
    session.navigate(url).await?;
    session.settle().await;
    session.current_markup().await
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Default)]
    struct Counters {
        opened: AtomicUsize,
        closed: AtomicUsize,
        last_url: Mutex<Option<String>>,
    }

    struct FakeBackend {
        counters: Arc<Counters>,
        markup: String,
        fail_navigate: bool,
        settle_forever: bool,
    }

    impl FakeBackend {
        fn with_markup(markup: &str) -> (Self, Arc<Counters>) {
            let counters = Arc::new(Counters::default());
            let backend = Self {
                counters: counters.clone(),
                markup: markup.to_string(),
                fail_navigate: false,
                settle_forever: false,
            };
            (backend, counters)
        }
    }

    #[async_trait]
    impl RenderBackend for FakeBackend {
        async fn open(&self) -> LookupResult<Box<dyn RenderSession>> {
            self.counters.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSession {
                counters: self.counters.clone(),
                markup: self.markup.clone(),
                fail_navigate: self.fail_navigate,
                settle_forever: self.settle_forever,
            }))
        }
    }

    struct FakeSession {
        counters: Arc<Counters>,
        markup: String,
        fail_navigate: bool,
        settle_forever: bool,
    }

    #[async_trait]
    impl RenderSession for FakeSession {
        async fn navigate(&mut self, url: &str) -> LookupResult<()> {
            *self.counters.last_url.lock().unwrap() = Some(url.to_string());
            if self.fail_navigate {
                return Err(LookupError::Session("navigation blew up".to_string()));
            }
            Ok(())
        }

        async fn settle(&mut self) {
            if self.settle_forever {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            }
        }

        async fn current_markup(&mut self) -> LookupResult<String> {
            Ok(self.markup.clone())
        }

        async fn close(&mut self) -> LookupResult<()> {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    const TWO_ROWS: &str = r#"<html><body>
        <div class="search_row"><a class="searchPersonaName" href="https://steamcommunity.com/id/first">First Hit</a></div>
        <div class="search_row"><a class="searchPersonaName" href="https://steamcommunity.com/profiles/76561197960287930">Second Hit</a></div>
    </body></html>"#;

    #[tokio::test]
    async fn test_success_path_closes_session_once() {
        let (backend, counters) = FakeBackend::with_markup(TWO_ROWS);
        let resolver =
            ProfileResolver::with_backend(Arc::new(backend), "https://steamcommunity.com");

        let profiles = resolver.search_display_names("hit").await.unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].display_name, "First Hit");
        assert_eq!(profiles[1].display_name, "Second Hit");
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_query_travels_as_url_fragment() {
        let (backend, counters) = FakeBackend::with_markup(TWO_ROWS);
        let resolver =
            ProfileResolver::with_backend(Arc::new(backend), "https://steamcommunity.com");

        resolver.search_display_names("gordon freeman").await.unwrap();

        let url = counters.last_url.lock().unwrap().clone().unwrap();
        assert_eq!(
            url,
            "https://steamcommunity.com/search/users/#text=gordon%20freeman"
        );
    }

    #[tokio::test]
    async fn test_zero_rows_is_not_found_with_original_query() {
        let (backend, counters) = FakeBackend::with_markup("<html><body></body></html>");
        let resolver =
            ProfileResolver::with_backend(Arc::new(backend), "https://steamcommunity.com");

        let err = resolver
            .search_display_names("xyz_no_such_user_1234")
            .await
            .unwrap_err();

        match err {
            LookupError::NotFound { query } => assert_eq!(query, "xyz_no_such_user_1234"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_navigate_failure_still_closes_session() {
        let counters = Arc::new(Counters::default());
        let backend = FakeBackend {
            counters: counters.clone(),
            markup: String::new(),
            fail_navigate: true,
            settle_forever: false,
        };
        let resolver =
            ProfileResolver::with_backend(Arc::new(backend), "https://steamcommunity.com");

        let err = resolver.search_display_names("whoever").await.unwrap_err();

        assert!(matches!(err, LookupError::Session(_)));
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_partial_rows_do_not_error_or_reduce_valid_rows() {
        let markup = r#"<html><body>
            <div class="search_row"><a class="searchPersonaName" href="">Empty Link</a></div>
            <div class="search_row"><a class="searchPersonaName" href="https://steamcommunity.com/id/ok">Valid Row</a></div>
            <div class="search_row"><a class="searchPersonaName" href="https://steamcommunity.com/id/blank"> </a></div>
        </body></html>"#;
        let (backend, _) = FakeBackend::with_markup(markup);
        let resolver =
            ProfileResolver::with_backend(Arc::new(backend), "https://steamcommunity.com");

        let profiles = resolver.search_display_names("whoever").await.unwrap();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].display_name, "Valid Row");
    }

    #[tokio::test]
    async fn test_cancellation_aborts_settle_and_still_closes() {
        let counters = Arc::new(Counters::default());
        let backend = FakeBackend {
            counters: counters.clone(),
            markup: TWO_ROWS.to_string(),
            fail_navigate: false,
            settle_forever: true,
        };
        let resolver =
            ProfileResolver::with_backend(Arc::new(backend), "https://steamcommunity.com");

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = resolver
            .search_display_names_with_cancel("whoever", &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Cancelled));
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }
}

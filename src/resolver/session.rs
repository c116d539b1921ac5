use async_trait::async_trait;

use crate::error::LookupResult;

/// One isolated rendering session.
///
/// The page populates its results from client-side script, so the driving
/// sequence is navigate -> settle -> capture; `settle` hides whether the
/// implementation waits a fixed window or polls the DOM until stable.
/// Callers must `close` exactly once on every exit path.
#[async_trait]
pub trait RenderSession: Send {
    /// Load the given URL in the session's page
    async fn navigate(&mut self, url: &str) -> LookupResult<()>;

    /// Wait for client-side script to finish populating the page
    async fn settle(&mut self);

    /// Serialized markup of the document as currently rendered
    async fn current_markup(&mut self) -> LookupResult<String>;

    /// Tear the session down, releasing the browser process and any
    /// resource handles it holds
    async fn close(&mut self) -> LookupResult<()>;
}

/// Launches rendering sessions. Each `open` yields a fresh, isolated
/// session; sessions are never shared across concurrent lookups.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    async fn open(&self) -> LookupResult<Box<dyn RenderSession>>;
}

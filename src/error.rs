use thiserror::Error;

/// Discriminated non-success model shared by every lookup operation.
///
/// The presentation shell branches on exactly these shapes; no operation
/// signals failure with a bare string or an unhandled fault.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Query understood, upstream/scrape legitimately empty
    #[error("no results found for query: {query}")]
    NotFound { query: String },

    /// Network failure, timeout or non-2xx status
    #[error("transport failure: {0}")]
    Transport(String),

    /// Malformed or unexpected response shape
    #[error("unexpected response shape: {0}")]
    Parse(String),

    /// Rendering session could not be launched or crashed
    #[error("rendering session failure: {0}")]
    Session(String),

    /// Caller aborted the lookup through its cancellation token
    #[error("lookup cancelled before completion")]
    Cancelled,
}

impl LookupError {
    pub fn not_found(query: impl Into<String>) -> Self {
        LookupError::NotFound { query: query.into() }
    }

    /// True for the "query understood, nothing matched" variant
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

/// Result type alias
pub type LookupResult<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_query() {
        let err = LookupError::not_found("portal 3");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no results found for query: portal 3");
    }

    #[test]
    fn test_other_kinds_are_not_not_found() {
        assert!(!LookupError::Transport("connection refused".to_string()).is_not_found());
        assert!(!LookupError::Parse("missing field".to_string()).is_not_found());
        assert!(!LookupError::Session("no chrome binary".to_string()).is_not_found());
        assert!(!LookupError::Cancelled.is_not_found());
    }
}

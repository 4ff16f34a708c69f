//! Errors reported by the feed's data operations.

use thiserror::Error;

/// Failure of a "refresh all" or "load more" request.
///
/// The coordinator never inspects the variant; it only records the error
/// and hands it back to the host so it can offer a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source could not serve the requested page right now.
    #[error("page {page} is unavailable, try again")]
    Unavailable { page: usize },

    /// The request was dropped without ever reporting back.
    #[error("request was abandoned before it completed")]
    Abandoned,

    /// Any other failure raised by a data source.
    #[error("feed source error: {0}")]
    Source(String),
}

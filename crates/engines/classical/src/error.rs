use thiserror::Error;

/// Errors returned by [`SearchEngine`](crate::SearchEngine) calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search engine used before initialize()")]
    NotInitialized,
    #[error("search engine has been shut down")]
    ShutDown,
}

pub type EngineResult<T> = Result<T, SearchError>;

use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Building the probe HTTP client failed.
    #[error("building http client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO operation failed.
    #[error("{0}: {1}")]
    Io(&'static str, #[source] std::io::Error),

    /// The configured member list resolved to zero members.
    #[error("no members configured")]
    NoMembers,
}

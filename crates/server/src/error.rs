use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Server has already been started.
    #[error("already started")]
    AlreadyStarted,

    /// Binding the listen address failed.
    #[error("binding listen address: {0}")]
    Bind(#[source] std::io::Error),
}

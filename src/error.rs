// Error types shared across the crate.
use thiserror::Error;

/// Failures surfaced by the reporting core.
///
/// Transport failures are carried through `Service` untranslated: the core
/// performs no retries and no error rewriting on behalf of the connection.
#[derive(Debug, Error)]
pub enum Error {
    /// A date / date-time string did not match the fixed positional layout.
    #[error("malformed date string '{0}'")]
    Format(String),

    /// A to-do list name did not contain a single-digit sprint number.
    /// Callers must check `is_sprint()` before asking for the number.
    #[error("no sprint number in list name '{0}'")]
    SprintNumber(String),

    /// The service returned a document the parser could not make sense of.
    #[error("malformed document: {0}")]
    Document(String),

    /// A failure raised by the service connection (network, auth, HTTP status).
    #[error(transparent)]
    Service(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

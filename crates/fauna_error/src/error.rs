//! Top-level error wrapper types.

use crate::{CommandError, ConfigError, HttpError, JsonError, StorageError, TransportError};

/// Every error condition the Fauna crates can report.
///
/// # Examples
///
/// ```
/// use fauna_error::{FaunaError, HttpError};
///
/// let http_err = HttpError::new(10, "no TLS backend");
/// let err: FaunaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FaunaErrorKind {
    /// Image client could not be built
    #[from(HttpError)]
    Http(HttpError),
    /// Command output could not be encoded
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Collection file error
    #[from(StorageError)]
    Storage(StorageError),
    /// Outbound image fetch error
    #[from(TransportError)]
    Transport(TransportError),
    /// Command validation or delivery error
    #[from(CommandError)]
    Command(CommandError),
}

/// Fauna error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fauna_error::{ConfigError, FaunaErrorKind, FaunaResult};
///
/// fn might_fail() -> FaunaResult<()> {
///     Err(ConfigError::new("bundled defaults", "missing field `resolver`"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FaunaErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fauna Error: {}", _0)]
pub struct FaunaError(Box<FaunaErrorKind>);

impl FaunaError {
    /// Create a new error from a kind.
    pub fn new(kind: FaunaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FaunaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FaunaErrorKind
impl<T> From<T> for FaunaError
where
    T: Into<FaunaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fauna operations.
pub type FaunaResult<T> = std::result::Result<T, FaunaError>;

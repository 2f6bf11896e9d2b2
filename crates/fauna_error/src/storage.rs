//! Storage error types.

/// Kinds of collection storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the data directory
    #[display("Failed to create data directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a collection file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read a collection file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Collection file is not a JSON object
    #[display("Corrupt collection: {}", _0)]
    Corrupt(String),
    /// Value could not be converted to or from JSON
    #[display("Invalid value: {}", _0)]
    InvalidValue(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use fauna_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Corrupt("guild_settings".to_string()));
/// assert!(format!("{}", err).contains("Corrupt collection"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

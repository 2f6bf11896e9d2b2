//! Configuration loading errors.

/// One layer of the configuration stack was unreadable or did not fit the
/// expected shape.
///
/// `layer` names where the bad value came from: a file path, the bundled
/// defaults or the merged stack with `FAUNA__*` variables applied.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error in {}: {} at line {} in {}", layer, message, line, file)]
pub struct ConfigError {
    /// Source of the failing layer
    pub layer: String,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError for `layer` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fauna_error::ConfigError;
    ///
    /// let err = ConfigError::new("fauna.toml", "resolver.retry_count must be an integer");
    /// assert_eq!(err.layer, "fauna.toml");
    /// assert!(err.to_string().contains("in fauna.toml"));
    /// ```
    #[track_caller]
    pub fn new(layer: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            layer: layer.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

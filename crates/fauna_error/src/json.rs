//! JSON encoding errors for command output.

/// A value could not be encoded for `--format json` output.
///
/// `subject` names what was being printed ("guild settings", "user stats",
/// "animal post") so the message points at the command that failed.
/// Collection files never produce this; the store logs and degrades instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: cannot encode {}: {} at line {} in {}", subject, message, line, file)]
pub struct JsonError {
    /// What was being encoded
    pub subject: &'static str,
    /// serde_json's message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for `subject` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fauna_error::JsonError;
    ///
    /// let err = JsonError::new("guild settings", "key must be a string");
    /// assert!(err.to_string().contains("cannot encode guild settings"));
    /// ```
    #[track_caller]
    pub fn new(subject: &'static str, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

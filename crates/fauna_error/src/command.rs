//! Command-level error types surfaced to the chat dispatcher.

/// Specific command failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CommandErrorKind {
    /// Daily posts cannot be enabled before a channel is chosen
    #[display("No daily channel set; choose a channel first")]
    ChannelNotSet,
    /// Time argument is not a valid 24-hour `HH:MM`
    #[display("Invalid time '{}': use HH:MM in 24-hour format", _0)]
    InvalidTime(String),
    /// Animal selection was empty
    #[display("No animals provided")]
    NoAnimals,
    /// The platform adapter failed to deliver a post
    #[display("Failed to publish post: {}", _0)]
    Publish(String),
}

/// Command error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    kind: CommandErrorKind,
    line: u32,
    file: &'static str,
}

impl CommandError {
    /// Create a new command error with caller location tracking.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CommandErrorKind {
        &self.kind
    }
}

//! Error types for the Fauna workspace.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! Most of the resolver and store never surface these to callers (they degrade
//! to fallbacks instead); the types exist for the internal layers and for the
//! command surface, where validation failures must reach the user.
//!
//! # Examples
//!
//! ```
//! use fauna_error::{FaunaResult, HttpError};
//!
//! fn build_client() -> FaunaResult<()> {
//!     Err(HttpError::new(10, "no TLS backend"))?
//! }
//!
//! assert!(build_client().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod http;
mod json;
mod storage;
mod transport;

pub use command::{CommandError, CommandErrorKind};
pub use config::ConfigError;
pub use error::{FaunaError, FaunaErrorKind, FaunaResult};
pub use http::HttpError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
pub use transport::{TransportError, TransportErrorKind};

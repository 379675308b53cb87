//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and error vocabulary shared by the session
//! aggregate, the ports and the application handlers.

mod errors;
mod ids;

pub use errors::{ErrorCategory, ErrorCode, ValidationError};
pub use ids::{SessionId, MAX_SESSION_ID_LENGTH};

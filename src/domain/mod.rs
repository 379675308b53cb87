//! Domain layer containing game rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (session IDs, error codes, validation)
//! - `session` - Session aggregate, grid, turn policy, events and rendering

pub mod foundation;
pub mod session;

//! Shared types for the Shine admin client
//!
//! Wire models, status state machines, list envelopes and the pure
//! formatting/filtering helpers used by `shine-client` and UI layers.

pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod response;

// Re-exports
pub use error::{TransitionError, ValidationError};
pub use response::{ApiErrorBody, ListEnvelope, Page};
pub use serde::{Deserialize, Serialize};

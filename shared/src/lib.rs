//! Shared types for the Menulink ordering system
//!
//! Domain models, error types, and utility helpers used by the core
//! crate and by presentation-layer collaborators.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};

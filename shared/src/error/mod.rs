//! Error handling for the Menulink ordering system
//!
//! Every failure carries a numeric [`ErrorCode`] plus a human-readable
//! message; codes are grouped into [`ErrorCategory`] ranges so callers can
//! branch on the class of failure without matching individual codes.

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult};

//! Utility module - errors, logging, time helpers

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

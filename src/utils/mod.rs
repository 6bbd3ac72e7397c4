//! Utility modules for recordops
//!
//! - **error**: Error types shared by every layer
//! - **logging**: Subscriber setup for the binaries

pub mod error; // Error handling
pub mod logging; // Logging & monitoring

use uuid::Uuid;

/// Generate a unique request ID, sent with every command request
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! CLI command implementations
//!
//! - `analyze` - Run insight detection on a dataset file
//! - `columns` - Column classification before/after coercion
//! - `config` - Effective configuration

pub mod analyze;
pub mod columns;
pub mod config;

// Re-export command functions for main.rs
pub use analyze::*;
pub use columns::*;
pub use config::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

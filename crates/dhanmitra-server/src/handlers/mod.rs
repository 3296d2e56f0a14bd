//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod system;

// Re-export all handlers for use in router
pub use analysis::*;
pub use system::*;

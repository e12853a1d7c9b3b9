//! Configuration types module

pub mod app;
pub mod fal;
pub mod logging;
pub mod server;

// Re-export main types
pub use app::*;
